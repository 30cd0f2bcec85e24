use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Per-call timeout and retry policy for the reasoning oracle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub timeout_ms: u64,
    /// Total attempts per turn, including the first.
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_ms: u64,
}

impl OracleConfig {
    /// Per-call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: defaults::DEFAULT_ORACLE_TIMEOUT_MS,
            max_attempts: defaults::DEFAULT_ORACLE_MAX_ATTEMPTS,
            initial_backoff_ms: defaults::DEFAULT_INITIAL_BACKOFF_MS,
            backoff_multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
            max_backoff_ms: defaults::DEFAULT_MAX_BACKOFF_MS,
        }
    }
}
