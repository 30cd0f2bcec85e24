use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::SleuthResult;

/// Who produced a trace record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The controller: hypothesis, observations, clarifications.
    User,
    /// The reasoning oracle.
    Assistant,
}

/// One immutable entry in a session trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub timestamp: DateTime<Utc>,
    pub role: Role,
    pub content: Option<String>,
    pub reasoning_content: Option<String>,
    pub cost: Option<f64>,
}

/// The full, ordered record of a session plus its accumulated cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub records: Vec<TraceRecord>,
    pub total_cost: f64,
}

impl Trace {
    /// Records produced by the oracle.
    pub fn assistant_turns(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter().filter(|r| r.role == Role::Assistant)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the trace has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty JSON for audit export.
    pub fn to_json_pretty(&self) -> SleuthResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
