//! Structured log events emitted by the agent loop.

/// An action ran against the graph.
pub fn action_executed(turn: u32, action: &str, ok: bool, result_len: usize) {
    tracing::info!(
        event = "action_executed",
        turn = turn,
        action = %action,
        ok = ok,
        result_len = result_len,
        "action executed"
    );
}

/// An oracle attempt failed and will be retried.
pub fn oracle_retry(attempt: u32, delay_ms: u64, error: &str) {
    tracing::warn!(
        event = "oracle_retry",
        attempt = attempt,
        delay_ms = delay_ms,
        error = %error,
        "oracle call failed, retrying"
    );
}

/// The oracle response could not be parsed.
pub fn response_unparseable(turn: u32, failures: u32, error: &str) {
    tracing::warn!(
        event = "response_unparseable",
        turn = turn,
        failures = failures,
        error = %error,
        "oracle response unparseable"
    );
}

/// A session ended with a decision.
pub fn session_decided(decision: &str, turns: u32, total_cost: f64) {
    tracing::info!(
        event = "session_decided",
        decision = %decision,
        turns = turns,
        total_cost = total_cost,
        "session decided"
    );
}

/// A session ended without a decision.
pub fn session_aborted(reason: &str, turns: u32, total_cost: f64) {
    tracing::warn!(
        event = "session_aborted",
        reason = %reason,
        turns = turns,
        total_cost = total_cost,
        "session aborted"
    );
}
