//! Reasoning-oracle plumbing: retry policy, a scripted double for tests,
//! and an optional HTTP client.

#[cfg(feature = "http-oracle")]
pub mod http;
pub mod retry;
pub mod scripted;

pub use retry::{call_with_retry, RetryPolicy, Sleeper, ThreadSleeper};
pub use scripted::{RecordingSleeper, ScriptedOracle, ScriptedStep};
