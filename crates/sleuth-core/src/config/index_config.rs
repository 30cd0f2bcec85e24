use serde::{Deserialize, Serialize};

use super::defaults;

/// Similarity index configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Indexes with at least this many vectors are scored in parallel.
    pub parallel_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: defaults::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
