//! Span definitions for sessions, turns, actions and graph construction.

/// Span covering one whole validation session.
#[macro_export]
macro_rules! session_span {
    ($hypothesis:expr) => {
        tracing::info_span!("sleuth.session", hypothesis = %$hypothesis)
    };
}

/// Span covering one oracle turn.
#[macro_export]
macro_rules! turn_span {
    ($turn:expr) => {
        tracing::info_span!("sleuth.turn", turn = $turn)
    };
}

/// Span covering a single action execution.
#[macro_export]
macro_rules! action_span {
    ($name:expr) => {
        tracing::debug_span!("sleuth.action", action = %$name)
    };
}

/// Span covering graph and index construction.
#[macro_export]
macro_rules! graph_build_span {
    ($nodes:expr, $edges:expr) => {
        tracing::info_span!("sleuth.graph_build", nodes = $nodes, edges = $edges)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SESSION: &str = "sleuth.session";
    pub const TURN: &str = "sleuth.turn";
    pub const ACTION: &str = "sleuth.action";
    pub const GRAPH_BUILD: &str = "sleuth.graph_build";
}
