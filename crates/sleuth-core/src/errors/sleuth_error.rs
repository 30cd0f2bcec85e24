use super::{GraphError, IndexError, OracleError, ResponseParseError};

/// Result alias used across the workspace.
pub type SleuthResult<T> = Result<T, SleuthError>;

/// Top-level error wrapping every subsystem error.
#[derive(Debug, thiserror::Error)]
pub enum SleuthError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("similarity index error: {0}")]
    Index(#[from] IndexError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("response parse error: {0}")]
    ResponseParse(#[from] ResponseParseError),

    #[error("embedding failed: {reason}")]
    EmbeddingError { reason: String },

    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SleuthError {
    /// Whether this error means a referenced node id does not exist.
    pub fn is_unknown_node(&self) -> bool {
        matches!(self, SleuthError::Graph(GraphError::UnknownNode { .. }))
    }
}
