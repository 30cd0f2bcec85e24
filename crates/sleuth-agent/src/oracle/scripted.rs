//! Deterministic oracle double that replays a fixed script.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use sleuth_core::errors::OracleError;
use sleuth_core::models::{OracleCompletion, OracleMessage, OracleRequest};
use sleuth_core::traits::IReasoningOracle;

use super::retry::Sleeper;

/// One scripted oracle response.
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    Reply(OracleCompletion),
    Fail(OracleError),
    /// Cancel the request's token, as a caller would mid-flight, and fail.
    Cancel,
    /// Cancel the request's token but still return the reply, like an
    /// oracle that never looks at cancellation.
    CancelThenReply(OracleCompletion),
}

impl ScriptedStep {
    pub fn reply(content: impl Into<String>, cost: f64) -> Self {
        ScriptedStep::Reply(OracleCompletion::new(content, cost))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Replays [`ScriptedStep`]s in order and records every prompt it receives.
/// An exhausted script fails with a transport error.
#[derive(Debug, Default)]
pub struct ScriptedOracle {
    steps: Mutex<VecDeque<ScriptedStep>>,
    prompts: Mutex<Vec<Vec<OracleMessage>>>,
}

impl ScriptedOracle {
    pub fn new(steps: impl IntoIterator<Item = ScriptedStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Script of plain replies, each charged `cost`.
    pub fn replies<S: Into<String>>(replies: impl IntoIterator<Item = S>, cost: f64) -> Self {
        Self::new(replies.into_iter().map(|r| ScriptedStep::reply(r, cost)))
    }

    /// Message sequences received so far, one per call.
    pub fn prompts(&self) -> Vec<Vec<OracleMessage>> {
        lock(&self.prompts).clone()
    }

    /// Number of calls received.
    pub fn calls(&self) -> usize {
        lock(&self.prompts).len()
    }

    /// Steps not yet replayed.
    pub fn remaining(&self) -> usize {
        lock(&self.steps).len()
    }
}

impl IReasoningOracle for ScriptedOracle {
    fn complete(&self, request: &OracleRequest) -> Result<OracleCompletion, OracleError> {
        lock(&self.prompts).push(request.messages.clone());
        match lock(&self.steps).pop_front() {
            Some(ScriptedStep::Reply(completion)) => Ok(completion),
            Some(ScriptedStep::Fail(error)) => Err(error),
            Some(ScriptedStep::Cancel) => {
                request.cancellation.cancel();
                Err(OracleError::Cancelled)
            }
            Some(ScriptedStep::CancelThenReply(completion)) => {
                request.cancellation.cancel();
                Ok(completion)
            }
            None => Err(OracleError::Transport {
                reason: "script exhausted".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Sleeper that only records the requested delays.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        lock(&self.delays).clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        lock(&self.delays).push(duration);
    }
}
