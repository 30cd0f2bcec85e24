use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ResponseParseError;

/// Terminal verdict on a hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Accept,
    Refine,
    Reject,
}

impl Decision {
    /// Uppercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accept => "ACCEPT",
            Decision::Refine => "REFINE",
            Decision::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decision {
    type Err = ResponseParseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACCEPT" => Ok(Decision::Accept),
            "REFINE" => Ok(Decision::Refine),
            "REJECT" => Ok(Decision::Reject),
            _ => Err(ResponseParseError::UnknownDecision {
                value: s.to_string(),
            }),
        }
    }
}

/// The decision produced by a completed session.
///
/// `new_hypothesis` is populated if and only if `decision` is `Refine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisValidationResult {
    pub decision: Decision,
    pub explanation: String,
    pub new_hypothesis: Option<String>,
}

impl HypothesisValidationResult {
    /// Build a result, enforcing the REFINE / `new_hypothesis` pairing.
    /// A stray `new_hypothesis` on ACCEPT or REJECT is dropped.
    pub fn new(
        decision: Decision,
        explanation: impl Into<String>,
        new_hypothesis: Option<String>,
    ) -> Result<Self, ResponseParseError> {
        let new_hypothesis = new_hypothesis
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty());
        let new_hypothesis = match decision {
            Decision::Refine => Some(new_hypothesis.ok_or(ResponseParseError::MissingNewHypothesis)?),
            Decision::Accept | Decision::Reject => None,
        };
        Ok(Self {
            decision,
            explanation: explanation.into(),
            new_hypothesis,
        })
    }

    pub fn accept(explanation: impl Into<String>) -> Self {
        Self {
            decision: Decision::Accept,
            explanation: explanation.into(),
            new_hypothesis: None,
        }
    }

    pub fn reject(explanation: impl Into<String>) -> Self {
        Self {
            decision: Decision::Reject,
            explanation: explanation.into(),
            new_hypothesis: None,
        }
    }

    pub fn refine(explanation: impl Into<String>, new_hypothesis: impl Into<String>) -> Self {
        Self {
            decision: Decision::Refine,
            explanation: explanation.into(),
            new_hypothesis: Some(new_hypothesis.into()),
        }
    }
}

/// Why a session ended without a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum AbortReason {
    /// Two consecutive oracle responses could not be parsed.
    UnparseableResponse,
    /// The iteration budget ran out before a decision.
    MaxIterationsExceeded,
    /// The caller cancelled the session.
    Cancelled,
    /// Oracle transport kept failing after all retry attempts.
    OracleUnavailable { last_error: String },
    /// The wall-clock session budget elapsed.
    SessionBudgetExceeded,
    /// Accumulated oracle cost reached the configured ceiling.
    CostBudgetExceeded,
}

impl AbortReason {
    /// Stable machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            AbortReason::UnparseableResponse => "unparseable_response",
            AbortReason::MaxIterationsExceeded => "max_iterations_exceeded",
            AbortReason::Cancelled => "cancelled",
            AbortReason::OracleUnavailable { .. } => "oracle_unavailable",
            AbortReason::SessionBudgetExceeded => "session_budget_exceeded",
            AbortReason::CostBudgetExceeded => "cost_budget_exceeded",
        }
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::OracleUnavailable { last_error } => {
                write!(f, "{}: {last_error}", self.code())
            }
            _ => f.write_str(self.code()),
        }
    }
}

/// Terminal state of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SessionOutcome {
    Decided(HypothesisValidationResult),
    Aborted(AbortReason),
}

impl SessionOutcome {
    /// Verdict, if decided.
    pub fn decision(&self) -> Option<Decision> {
        match self {
            SessionOutcome::Decided(result) => Some(result.decision),
            SessionOutcome::Aborted(_) => None,
        }
    }

    /// Validation result, if decided.
    pub fn result(&self) -> Option<&HypothesisValidationResult> {
        match self {
            SessionOutcome::Decided(result) => Some(result),
            SessionOutcome::Aborted(_) => None,
        }
    }

    /// Abort reason, if aborted.
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        match self {
            SessionOutcome::Decided(_) => None,
            SessionOutcome::Aborted(reason) => Some(reason),
        }
    }

    /// Whether the session reached a verdict.
    pub fn is_decided(&self) -> bool {
        matches!(self, SessionOutcome::Decided(_))
    }
}
