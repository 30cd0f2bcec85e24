use serde::{Deserialize, Serialize};

use super::defaults;

/// Agent loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Hard upper bound on oracle turns per session. Default: 20.
    pub max_iterations: usize,
    /// Clarification retries after an unparseable response. Default: 1.
    pub parse_retries: usize,
    /// Optional wall-clock budget for a whole session, in seconds.
    pub session_budget_secs: Option<u64>,
    /// Optional ceiling on the accumulated oracle cost.
    pub max_cost: Option<f64>,
    /// `top_k` used by `similar_nodes` when the oracle omits it. Default: 5.
    pub default_top_k: usize,
    /// Largest `top_k` the oracle may request. Default: 50.
    pub max_top_k: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            parse_retries: defaults::DEFAULT_PARSE_RETRIES,
            session_budget_secs: None,
            max_cost: None,
            default_top_k: defaults::DEFAULT_TOP_K,
            max_top_k: defaults::DEFAULT_MAX_TOP_K,
        }
    }
}
