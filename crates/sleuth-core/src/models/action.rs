use serde::{Deserialize, Serialize};

use crate::constants;

/// Query argument for `similar_nodes`: a raw vector or text for the external embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimilarityQuery {
    Embedding(Vec<f32>),
    Text(String),
}

/// One action invocation selected by the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "args", rename_all = "snake_case")]
pub enum ActionCall {
    SimilarNodes {
        #[serde(alias = "text", alias = "embedding")]
        query: SimilarityQuery,
        #[serde(default, alias = "k", skip_serializing_if = "Option::is_none")]
        top_k: Option<usize>,
    },
    Causes {
        #[serde(alias = "id", alias = "node")]
        node_id: String,
    },
    Effects {
        #[serde(alias = "id", alias = "node")]
        node_id: String,
    },
    CausalChain {
        #[serde(alias = "source")]
        source_id: String,
        #[serde(alias = "target")]
        target_id: String,
    },
    Connect {
        #[serde(alias = "source")]
        source_id: String,
        #[serde(alias = "target")]
        target_id: String,
    },
}

impl ActionCall {
    /// The action's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            ActionCall::SimilarNodes { .. } => constants::ACTION_SIMILAR_NODES,
            ActionCall::Causes { .. } => constants::ACTION_CAUSES,
            ActionCall::Effects { .. } => constants::ACTION_EFFECTS,
            ActionCall::CausalChain { .. } => constants::ACTION_CAUSAL_CHAIN,
            ActionCall::Connect { .. } => constants::ACTION_CONNECT,
        }
    }

    /// Whether executing this call may mutate the graph.
    pub fn is_mutation(&self) -> bool {
        matches!(self, ActionCall::Connect { .. })
    }
}

/// Name, description and JSON argument schema of one action, shown to the oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
