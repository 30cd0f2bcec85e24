use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;

/// Role of a prompt message sent to the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleMessage {
    pub role: MessageRole,
    pub content: String,
}

impl OracleMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// One completion request.
#[derive(Debug, Clone)]
pub struct OracleRequest {
    pub messages: Vec<OracleMessage>,
    /// Per-call timeout the oracle must honour.
    pub timeout: Duration,
    /// Set when the caller wants the in-flight call abandoned.
    pub cancellation: CancellationToken,
}

/// Text returned by the oracle plus what the call cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OracleCompletion {
    pub content: String,
    #[serde(default)]
    pub reasoning_content: Option<String>,
    #[serde(default)]
    pub cost: f64,
}

impl OracleCompletion {
    pub fn new(content: impl Into<String>, cost: f64) -> Self {
        Self {
            content: content.into(),
            reasoning_content: None,
            cost,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning_content = Some(reasoning.into());
        self
    }
}
