/// Sleuth system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Names of the five actions the agent loop may invoke.
pub const ACTION_SIMILAR_NODES: &str = "similar_nodes";
pub const ACTION_CAUSES: &str = "causes";
pub const ACTION_EFFECTS: &str = "effects";
pub const ACTION_CAUSAL_CHAIN: &str = "causal_chain";
pub const ACTION_CONNECT: &str = "connect";

/// All action names in the order they are presented to the oracle.
pub const ACTION_NAMES: [&str; 5] = [
    ACTION_SIMILAR_NODES,
    ACTION_CAUSES,
    ACTION_EFFECTS,
    ACTION_CAUSAL_CHAIN,
    ACTION_CONNECT,
];

/// Tolerance used when comparing similarity scores.
pub const SCORE_EPSILON: f32 = 1e-5;

/// Default maximum depth for ancestor/descendant traces.
pub const MAX_TRAVERSAL_DEPTH: usize = 50;
