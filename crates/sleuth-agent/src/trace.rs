//! TraceRecorder: append-only session log with a running cost total.

use chrono::Utc;
use sleuth_core::models::{OracleCompletion, Role, Trace, TraceRecord};

/// Accumulates [`TraceRecord`]s for one session.
///
/// Records are never edited or removed. The running total is the sum of
/// every non-null `cost`.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    trace: Trace,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller-side message: hypothesis, observation or clarification.
    pub fn record_user(&mut self, content: impl Into<String>) -> &TraceRecord {
        self.push(TraceRecord {
            timestamp: Utc::now(),
            role: Role::User,
            content: Some(content.into()),
            reasoning_content: None,
            cost: None,
        })
    }

    /// Oracle output, charged at the completion's cost.
    pub fn record_assistant(&mut self, completion: &OracleCompletion) -> &TraceRecord {
        self.push(TraceRecord {
            timestamp: Utc::now(),
            role: Role::Assistant,
            content: Some(completion.content.clone()),
            reasoning_content: completion.reasoning_content.clone(),
            cost: Some(completion.cost),
        })
    }

    fn push(&mut self, record: TraceRecord) -> &TraceRecord {
        if let Some(cost) = record.cost {
            self.trace.total_cost += cost;
        }
        self.trace.records.push(record);
        let last = self.trace.records.len() - 1;
        &self.trace.records[last]
    }

    /// Records in append order.
    pub fn records(&self) -> &[TraceRecord] {
        &self.trace.records
    }

    /// Sum of all non-null record costs.
    pub fn total_cost(&self) -> f64 {
        self.trace.total_cost
    }

    /// Number of oracle completions recorded.
    pub fn assistant_turns(&self) -> usize {
        self.trace.assistant_turns().count()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Read-only view of the trace so far.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Consume the recorder, yielding the trace.
    pub fn into_trace(self) -> Trace {
        self.trace
    }
}
