//! Error taxonomy.
//!
//! Structural errors ([`GraphError`], [`IndexError`]) surface before a
//! session starts. Runtime errors ([`OracleError`], [`ResponseParseError`])
//! are retried inside the agent loop and only ever reach the caller as an
//! aborted session outcome.

mod graph_error;
mod index_error;
mod oracle_error;
mod parse_error;
mod sleuth_error;

pub use graph_error::GraphError;
pub use index_error::IndexError;
pub use oracle_error::OracleError;
pub use parse_error::ResponseParseError;
pub use sleuth_error::{SleuthError, SleuthResult};
