//! # sleuth-core
//!
//! Foundation crate for the Sleuth causal-graph exploration engine.
//! Defines the shared data model, error taxonomy, configuration, and the
//! boundary traits for the reasoning oracle and the external embedder.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::SleuthConfig;
pub use errors::{SleuthError, SleuthResult};
pub use models::{
    AdjacencyList, AdjacencyListRecord, Decision, HypothesisValidationResult, Node,
    NodeReference, Role, TraceRecord,
};
