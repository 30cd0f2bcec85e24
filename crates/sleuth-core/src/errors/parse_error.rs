/// Oracle output that could not be interpreted as an action or a decision.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResponseParseError {
    #[error("no JSON object found in response")]
    NoJson,

    #[error("invalid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("unknown action `{name}`")]
    UnknownAction { name: String },

    #[error("invalid arguments for `{action}`: {reason}")]
    InvalidArguments { action: String, reason: String },

    #[error("unknown decision `{value}` (expected ACCEPT, REFINE or REJECT)")]
    UnknownDecision { value: String },

    #[error("REFINE decision requires a non-empty new_hypothesis")]
    MissingNewHypothesis,

    #[error("response names both an action and a decision")]
    Ambiguous,

    #[error("response names neither an action nor a decision")]
    Unrecognized,
}
