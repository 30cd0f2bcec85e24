//! # sleuth-agent
//!
//! The hypothesis-validation loop. An [`AgentLoop`] asks a reasoning oracle
//! for one action per turn, runs it through the [`ActionSet`] capability
//! surface, records every exchange in the trace, and stops on a decision or
//! an abort condition.

pub mod actions;
pub mod agent_loop;
pub mod oracle;
pub mod parser;
pub mod prompt;
pub mod session;
pub mod trace;

pub use actions::{ActionOutcome, ActionSet, Observation};
pub use agent_loop::{AgentLoop, Mutation, SessionReport};
pub use oracle::retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use parser::{parse_reply, OracleReply};
pub use session::ExplorationSession;
pub use trace::TraceRecorder;
