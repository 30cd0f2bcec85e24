//! Bounded retries with exponential backoff for oracle calls.

use std::time::Duration;

use sleuth_core::config::OracleConfig;
use sleuth_core::errors::OracleError;
use sleuth_core::models::{OracleCompletion, OracleRequest};
use sleuth_core::traits::IReasoningOracle;
use sleuth_observability::events;
use tracing::debug;

/// Blocks the current thread between attempts. Swapped out in tests.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Real sleeping via `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Attempt budget and backoff schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub multiplier: f64,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &OracleConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            multiplier: config.backoff_multiplier.max(1.0),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            multiplier: 1.0,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay after the `failed_attempt`-th failure (1-based), capped at
    /// `max_backoff`. A server-supplied `retry_after` raises the floor.
    pub fn delay_for(&self, failed_attempt: u32, retry_after: Option<Duration>) -> Duration {
        let exponent = failed_attempt.saturating_sub(1) as i32;
        let scaled = self.initial_backoff.as_nanos() as f64 * self.multiplier.powi(exponent);
        let backoff = Duration::from_nanos(scaled.min(self.max_backoff.as_nanos() as f64) as u64);
        match retry_after {
            Some(hint) => backoff.max(hint),
            None => backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&OracleConfig::default())
    }
}

/// Call the oracle until it succeeds, fails permanently, or the attempt
/// budget runs out. Returns the last error in the latter two cases.
pub fn call_with_retry(
    oracle: &dyn IReasoningOracle,
    request: &OracleRequest,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<OracleCompletion, OracleError> {
    let mut attempt = 1;
    loop {
        if request.cancellation.is_cancelled() {
            return Err(OracleError::Cancelled);
        }
        match oracle.complete(request) {
            Ok(_) if request.cancellation.is_cancelled() => {
                debug!(oracle = oracle.name(), attempt, "completion arrived after cancellation");
                return Err(OracleError::Cancelled);
            }
            Ok(completion) => {
                debug!(oracle = oracle.name(), attempt, cost = completion.cost, "oracle completed");
                return Ok(completion);
            }
            Err(e) if e.is_retryable() && attempt < policy.max_attempts => {
                let delay =
                    policy.delay_for(attempt, e.retry_after_ms().map(Duration::from_millis));
                events::oracle_retry(attempt, delay.as_millis() as u64, &e.to_string());
                sleeper.sleep(delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
