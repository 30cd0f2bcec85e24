//! Shared data model.

mod action;
mod decision;
mod node;
mod oracle;
mod trace;

pub use action::{ActionCall, ActionSpec, SimilarityQuery};
pub use decision::{AbortReason, Decision, HypothesisValidationResult, SessionOutcome};
pub use node::{AdjacencyList, AdjacencyListRecord, Node, NodeReference, SimilarNode};
pub use oracle::{MessageRole, OracleCompletion, OracleMessage, OracleRequest};
pub use trace::{Role, Trace, TraceRecord};
