//! # sleuth-observability
//!
//! Logging for the exploration engine: subscriber installation, span
//! macros for sessions, turns and actions, and structured event helpers.

pub mod tracing_setup;

pub use tracing_setup::{events, init_tracing, spans};
