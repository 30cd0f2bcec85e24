use crate::errors::OracleError;
use crate::models::{OracleCompletion, OracleRequest};

/// Opaque text-completion capability driving the agent loop.
///
/// Implementations are blocking and must honour `request.timeout`,
/// reporting failures as typed [`OracleError`]s rather than panicking.
pub trait IReasoningOracle: Send + Sync {
    fn complete(&self, request: &OracleRequest) -> Result<OracleCompletion, OracleError>;

    /// Human-readable oracle name, used in logs.
    fn name(&self) -> &str;
}
