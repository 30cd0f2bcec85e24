/// Failures reported by the reasoning oracle boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("oracle call timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error("oracle rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("oracle transport failure: {reason}")]
    Transport { reason: String },

    #[error("oracle returned a malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// The endpoint refused the request itself (bad credentials, unknown
    /// model, malformed payload). Repeating it cannot help.
    #[error("oracle rejected the request with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    #[error("oracle call cancelled")]
    Cancelled,
}

impl OracleError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, OracleError::Cancelled | OracleError::Rejected { .. })
    }

    /// Minimum delay the oracle asked us to wait before retrying.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            OracleError::RateLimited { retry_after_ms } => *retry_after_ms,
            _ => None,
        }
    }
}
