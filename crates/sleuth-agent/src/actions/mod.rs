//! ActionSet: the only graph operations reachable from the agent loop.

mod schema;

use serde::{Deserialize, Serialize};
use sleuth_causal::{GraphStore, PathFinder};
use sleuth_core::config::AgentConfig;
use sleuth_core::errors::{SleuthError, SleuthResult};
use sleuth_core::models::{ActionCall, ActionSpec, AdjacencyList, SimilarNode, SimilarityQuery};
use sleuth_core::traits::IEmbeddingProvider;
use sleuth_similarity::SimilarityIndex;
use tracing::debug;

/// Result of one executed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ActionOutcome {
    Similar(Vec<SimilarNode>),
    Adjacency(AdjacencyList),
    Connected {
        source_id: String,
        target_id: String,
        created: bool,
    },
}

impl ActionOutcome {
    /// Number of items returned (1 for `connect`).
    pub fn len(&self) -> usize {
        match self {
            ActionOutcome::Similar(hits) => hits.len(),
            ActionOutcome::Adjacency(records) => records.len(),
            ActionOutcome::Connected { .. } => 1,
        }
    }

    /// Whether the outcome carries no nodes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adjacency records, for `causes`, `effects` and `causal_chain`.
    pub fn as_adjacency(&self) -> Option<&AdjacencyList> {
        match self {
            ActionOutcome::Adjacency(records) => Some(records),
            _ => None,
        }
    }
}

/// What the oracle sees after an action: its result or the error it raised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub action: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ActionOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Observation {
    pub fn from_result(call: &ActionCall, result: &SleuthResult<ActionOutcome>) -> Self {
        match result {
            Ok(outcome) => Self {
                action: call.name().to_string(),
                ok: true,
                result: Some(outcome.clone()),
                error: None,
            },
            Err(e) => Self {
                action: call.name().to_string(),
                ok: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Compact JSON, as stored in the trace.
    pub fn to_json(&self) -> SleuthResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Capability surface binding one graph and its similarity index.
///
/// Exposes exactly five operations. `connect` is the sole mutator.
pub struct ActionSet<'a> {
    graph: &'a mut GraphStore,
    index: &'a SimilarityIndex,
    path_finder: PathFinder,
    embedder: Option<&'a dyn IEmbeddingProvider>,
    default_top_k: usize,
    max_top_k: usize,
}

impl<'a> ActionSet<'a> {
    pub fn new(graph: &'a mut GraphStore, index: &'a SimilarityIndex, config: &AgentConfig) -> Self {
        Self {
            graph,
            index,
            path_finder: PathFinder::default(),
            embedder: None,
            default_top_k: config.default_top_k.max(1),
            max_top_k: config.max_top_k.max(1),
        }
    }

    /// Attach the external embedder used for text queries.
    pub fn with_embedder(mut self, embedder: &'a dyn IEmbeddingProvider) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_path_finder(mut self, path_finder: PathFinder) -> Self {
        self.path_finder = path_finder;
        self
    }

    /// Name, description and argument schema of every action.
    pub fn specs(&self) -> Vec<ActionSpec> {
        schema::action_specs(self.default_top_k, self.max_top_k)
    }

    /// Nodes most similar to `query`, best first.
    ///
    /// `top_k` is clamped to `[1, max_top_k]`; `None` uses the default.
    pub fn similar_nodes(
        &self,
        query: &SimilarityQuery,
        top_k: Option<usize>,
    ) -> SleuthResult<Vec<SimilarNode>> {
        let top_k = top_k.unwrap_or(self.default_top_k).clamp(1, self.max_top_k);
        let embedded;
        let vector: &[f32] = match query {
            SimilarityQuery::Embedding(v) => v,
            SimilarityQuery::Text(text) => {
                let embedder = self.embedder.ok_or_else(|| SleuthError::EmbeddingError {
                    reason: "text query given but no embedding provider is configured".to_string(),
                })?;
                embedded = embedder.embed(text)?;
                debug!(provider = embedder.name(), dims = embedded.len(), "embedded text query");
                &embedded
            }
        };

        let hits = self.index.search(vector, top_k)?;
        Ok(hits
            .into_iter()
            .filter_map(|hit| {
                self.graph.record(&hit.node_id).map(|record| SimilarNode {
                    score: hit.score,
                    record,
                })
            })
            .collect())
    }

    /// Direct causes (parents) of `node_id`.
    pub fn causes(&self, node_id: &str) -> AdjacencyList {
        self.graph.get_parents(node_id)
    }

    /// Direct effects (children) of `node_id`.
    pub fn effects(&self, node_id: &str) -> AdjacencyList {
        self.graph.get_children(node_id)
    }

    /// Shortest causal chain from `source_id` to `target_id`.
    pub fn causal_chain(&self, source_id: &str, target_id: &str) -> AdjacencyList {
        self.path_finder
            .get_causal_chain(&*self.graph, source_id, target_id)
    }

    /// Add `source_id → target_id`. Idempotent; fails on unknown endpoints.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> SleuthResult<bool> {
        self.graph.connect(source_id, target_id)
    }

    /// Dispatch a parsed call.
    pub fn execute(&mut self, call: &ActionCall) -> SleuthResult<ActionOutcome> {
        match call {
            ActionCall::SimilarNodes { query, top_k } => {
                self.similar_nodes(query, *top_k).map(ActionOutcome::Similar)
            }
            ActionCall::Causes { node_id } => Ok(ActionOutcome::Adjacency(self.causes(node_id))),
            ActionCall::Effects { node_id } => Ok(ActionOutcome::Adjacency(self.effects(node_id))),
            ActionCall::CausalChain {
                source_id,
                target_id,
            } => Ok(ActionOutcome::Adjacency(
                self.causal_chain(source_id, target_id),
            )),
            ActionCall::Connect {
                source_id,
                target_id,
            } => {
                let created = self.connect(source_id, target_id)?;
                Ok(ActionOutcome::Connected {
                    source_id: source_id.clone(),
                    target_id: target_id.clone(),
                    created,
                })
            }
        }
    }

    /// Read-only view of the bound graph.
    pub fn graph(&self) -> &GraphStore {
        &*self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sleuth_core::config::IndexConfig;
    use sleuth_core::models::Node;

    struct FixedEmbedder(Vec<f32>);

    impl IEmbeddingProvider for FixedEmbedder {
        fn embed(&self, _text: &str) -> SleuthResult<Vec<f32>> {
            Ok(self.0.clone())
        }
        fn dimensions(&self) -> usize {
            self.0.len()
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn fixture() -> (GraphStore, SimilarityIndex) {
        let nodes = vec![
            Node::new("a", "rain", vec![1.0, 0.0]),
            Node::new("b", "wet soil", vec![0.9, 0.1]),
            Node::new("c", "mud", vec![0.0, 1.0]),
        ];
        let edges = vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "c".to_string()),
        ];
        let graph = GraphStore::build(nodes, edges).unwrap();
        let (ids, vecs) = graph.embeddings();
        let index = SimilarityIndex::build(ids, vecs, &IndexConfig::default()).unwrap();
        (graph, index)
    }

    #[test]
    fn neighbour_queries_follow_edges() {
        let (mut graph, index) = fixture();
        let actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
        assert_eq!(actions.causes("b")[0].id, "a");
        assert_eq!(actions.effects("b")[0].id, "c");
        assert!(actions.effects("missing").is_empty());
        let chain: Vec<_> = actions.causal_chain("a", "c").into_iter().map(|r| r.id).collect();
        assert_eq!(chain, vec!["a", "b", "c"]);
    }

    #[test]
    fn similar_nodes_resolves_records() {
        let (mut graph, index) = fixture();
        let actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
        let hits = actions
            .similar_nodes(&SimilarityQuery::Embedding(vec![1.0, 0.0]), Some(2))
            .unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].record.id, "a");
        assert_eq!(hits[0].record.description, "rain");
        assert_eq!(hits[1].record.id, "b");
    }

    #[test]
    fn top_k_is_clamped() {
        let (mut graph, index) = fixture();
        let config = AgentConfig {
            max_top_k: 2,
            ..AgentConfig::default()
        };
        let actions = ActionSet::new(&mut graph, &index, &config);
        let query = SimilarityQuery::Embedding(vec![1.0, 0.0]);
        assert_eq!(actions.similar_nodes(&query, Some(100)).unwrap().len(), 2);
        assert_eq!(actions.similar_nodes(&query, Some(0)).unwrap().len(), 1);
        assert_eq!(actions.similar_nodes(&query, None).unwrap().len(), 2);
    }

    #[test]
    fn text_query_needs_embedder() {
        let (mut graph, index) = fixture();
        let query = SimilarityQuery::Text("dirt".into());
        {
            let actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
            let err = actions.similar_nodes(&query, None).unwrap_err();
            assert!(matches!(err, SleuthError::EmbeddingError { .. }));
        }
        let embedder = FixedEmbedder(vec![0.0, 1.0]);
        let actions =
            ActionSet::new(&mut graph, &index, &AgentConfig::default()).with_embedder(&embedder);
        let hits = actions.similar_nodes(&query, Some(1)).unwrap();
        assert_eq!(hits[0].record.id, "c");
    }

    #[test]
    fn connect_mutates_and_is_idempotent() {
        let (mut graph, index) = fixture();
        let mut actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
        let call = ActionCall::Connect {
            source_id: "c".into(),
            target_id: "a".into(),
        };
        let first = actions.execute(&call).unwrap();
        assert!(matches!(first, ActionOutcome::Connected { created: true, .. }));
        let second = actions.execute(&call).unwrap();
        assert!(matches!(second, ActionOutcome::Connected { created: false, .. }));
        assert!(actions.effects("c").iter().any(|r| r.id == "a"));
        drop(actions);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn connect_unknown_node_is_an_error_observation() {
        let (mut graph, index) = fixture();
        let mut actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
        let call = ActionCall::Connect {
            source_id: "a".into(),
            target_id: "ghost".into(),
        };
        let result = actions.execute(&call);
        assert!(result.as_ref().unwrap_err().is_unknown_node());
        let obs = Observation::from_result(&call, &result);
        assert!(!obs.ok);
        assert!(obs.error.unwrap().contains("ghost"));
    }

    #[test]
    fn specs_list_all_actions() {
        let (mut graph, index) = fixture();
        let actions = ActionSet::new(&mut graph, &index, &AgentConfig::default());
        let names: Vec<_> = actions.specs().into_iter().map(|s| s.name).collect();
        assert_eq!(names, sleuth_core::constants::ACTION_NAMES);
    }
}
