//! TOML-backed configuration, resolved once per session.

mod agent_config;
pub mod defaults;
mod index_config;
mod observability_config;
mod oracle_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use agent_config::AgentConfig;
pub use index_config::IndexConfig;
pub use observability_config::ObservabilityConfig;
pub use oracle_config::OracleConfig;

use crate::errors::{SleuthError, SleuthResult};

/// Root configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SleuthConfig {
    pub agent: AgentConfig,
    pub oracle: OracleConfig,
    pub index: IndexConfig,
    pub observability: ObservabilityConfig,
}

impl SleuthConfig {
    /// Parse configuration from a TOML string. An empty string yields defaults.
    pub fn from_toml(source: &str) -> SleuthResult<Self> {
        let config: Self = toml::from_str(source).map_err(|e| SleuthError::ConfigError {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> SleuthResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| SleuthError::ConfigError {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> SleuthResult<String> {
        toml::to_string(self).map_err(|e| SleuthError::ConfigError {
            reason: e.to_string(),
        })
    }

    /// Reject values that would make a session unable to run.
    pub fn validate(&self) -> SleuthResult<()> {
        let invalid = |reason: &str| {
            Err(SleuthError::ConfigError {
                reason: reason.to_string(),
            })
        };
        if self.agent.max_iterations == 0 {
            return invalid("agent.max_iterations must be at least 1");
        }
        if self.agent.max_top_k == 0 || self.agent.default_top_k == 0 {
            return invalid("agent top_k limits must be at least 1");
        }
        if self.oracle.max_attempts == 0 {
            return invalid("oracle.max_attempts must be at least 1");
        }
        if self.oracle.backoff_multiplier < 1.0 {
            return invalid("oracle.backoff_multiplier must be >= 1.0");
        }
        if self.agent.max_cost.is_some_and(|c| c < 0.0) {
            return invalid("agent.max_cost must not be negative");
        }
        Ok(())
    }
}
