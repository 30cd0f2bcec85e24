//! AgentLoop: the bounded exploration state machine.
//!
//! ```text
//! AwaitingAction --oracle--> ExecutingAction --observation--> AwaitingAction
//!       |
//!       +--decision--> Decided
//!       +--budget, cancellation, parse or transport failure--> Aborted
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sleuth_core::config::{AgentConfig, SleuthConfig};
use sleuth_core::errors::OracleError;
use sleuth_core::models::{
    AbortReason, ActionCall, Decision, HypothesisValidationResult, OracleRequest, Role,
    SessionOutcome, Trace,
};
use sleuth_core::traits::IReasoningOracle;
use sleuth_core::CancellationToken;
use sleuth_observability::{action_span, events, session_span, turn_span};
use tracing::debug;
use uuid::Uuid;

use crate::actions::{ActionOutcome, ActionSet, Observation};
use crate::oracle::retry::{call_with_retry, RetryPolicy, Sleeper, ThreadSleeper};
use crate::parser::{parse_reply, OracleReply};
use crate::prompt::{clarification_message, hypothesis_message, PromptBuilder};
use crate::trace::TraceRecorder;

/// An edge created by `connect` during a session. Committed immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub turn: usize,
    pub source_id: String,
    pub target_id: String,
}

/// Everything a caller gets back from [`AgentLoop::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub hypothesis: String,
    pub outcome: SessionOutcome,
    pub trace: Trace,
    /// Oracle turns used.
    pub turns: usize,
    pub mutations: Vec<Mutation>,
}

impl SessionReport {
    /// Verdict, if the session decided.
    pub fn decision(&self) -> Option<Decision> {
        self.outcome.decision()
    }

    /// Full validation result, if the session decided.
    pub fn result(&self) -> Option<&HypothesisValidationResult> {
        self.outcome.result()
    }

    /// Why the session aborted, if it did.
    pub fn abort_reason(&self) -> Option<&AbortReason> {
        self.outcome.abort_reason()
    }

    /// Accumulated oracle cost.
    pub fn total_cost(&self) -> f64 {
        self.trace.total_cost
    }

    /// Action observations recorded in the trace, in order.
    pub fn observations(&self) -> Vec<Observation> {
        self.trace
            .records
            .iter()
            .filter(|r| r.role == Role::User)
            .filter_map(|r| r.content.as_deref())
            .filter_map(|c| serde_json::from_str(c).ok())
            .collect()
    }

    /// Outcome and trace, the pair callers consume.
    pub fn into_parts(self) -> (SessionOutcome, Trace) {
        (self.outcome, self.trace)
    }
}

enum LoopState {
    AwaitingAction,
    ExecutingAction(ActionCall),
    Decided(HypothesisValidationResult),
    Aborted(AbortReason),
}

/// Drives one hypothesis-validation session against a reasoning oracle.
///
/// Holds only configuration; all per-session state lives inside
/// [`run`](Self::run), so one loop can serve many sessions.
#[derive(Clone)]
pub struct AgentLoop {
    agent: AgentConfig,
    retry: RetryPolicy,
    oracle_timeout: Duration,
    cancellation: CancellationToken,
    sleeper: Arc<dyn Sleeper>,
}

impl AgentLoop {
    pub fn new(config: &SleuthConfig) -> Self {
        Self {
            agent: config.agent.clone(),
            retry: RetryPolicy::from_config(&config.oracle),
            oracle_timeout: config.oracle.timeout(),
            cancellation: CancellationToken::new(),
            sleeper: Arc::new(ThreadSleeper),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.agent.max_iterations = max_iterations;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Token that cancels sessions run by this loop.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Turn cap in effect.
    pub fn max_iterations(&self) -> usize {
        self.agent.max_iterations
    }

    /// Run one session to a decision or an abort.
    ///
    /// Never fails: runtime errors end the session as
    /// [`SessionOutcome::Aborted`] with the trace accumulated so far.
    pub fn run(
        &self,
        hypothesis: &str,
        actions: &mut ActionSet<'_>,
        oracle: &dyn IReasoningOracle,
    ) -> SessionReport {
        let session_id = Uuid::new_v4();
        let span = session_span!(hypothesis);
        let _enter = span.enter();

        let started = Instant::now();
        let prompts = PromptBuilder::new(&actions.specs());
        let mut recorder = TraceRecorder::new();
        recorder.record_user(hypothesis_message(hypothesis));

        let mut turns = 0usize;
        let mut parse_failures = 0usize;
        let mut mutations = Vec::new();
        let mut state = LoopState::AwaitingAction;

        let outcome = loop {
            state = match state {
                LoopState::AwaitingAction => {
                    if let Some(reason) = self.budget_exhausted(started, &recorder) {
                        LoopState::Aborted(reason)
                    } else if turns >= self.agent.max_iterations {
                        LoopState::Aborted(AbortReason::MaxIterationsExceeded)
                    } else {
                        turns += 1;
                        let _turn = turn_span!(turns).entered();
                        self.next_turn(turns, &prompts, &mut recorder, &mut parse_failures, oracle)
                    }
                }
                LoopState::ExecutingAction(call) => {
                    let _action = action_span!(call.name()).entered();
                    let result = actions.execute(&call);
                    if let Ok(ActionOutcome::Connected {
                        source_id,
                        target_id,
                        created: true,
                    }) = &result
                    {
                        mutations.push(Mutation {
                            turn: turns,
                            source_id: source_id.clone(),
                            target_id: target_id.clone(),
                        });
                    }
                    events::action_executed(
                        turns as u32,
                        call.name(),
                        result.is_ok(),
                        result.as_ref().map_or(0, ActionOutcome::len),
                    );
                    let observation = Observation::from_result(&call, &result);
                    let content = observation.to_json().unwrap_or_else(|e| e.to_string());
                    recorder.record_user(content);
                    LoopState::AwaitingAction
                }
                LoopState::Decided(result) => {
                    events::session_decided(
                        result.decision.as_str(),
                        turns as u32,
                        recorder.total_cost(),
                    );
                    break SessionOutcome::Decided(result);
                }
                LoopState::Aborted(reason) => {
                    events::session_aborted(
                        &reason.to_string(),
                        turns as u32,
                        recorder.total_cost(),
                    );
                    break SessionOutcome::Aborted(reason);
                }
            };
        };

        SessionReport {
            session_id,
            hypothesis: hypothesis.to_string(),
            outcome,
            trace: recorder.into_trace(),
            turns,
            mutations,
        }
    }

    /// One oracle exchange: prompt, retry, record, parse.
    fn next_turn(
        &self,
        turn: usize,
        prompts: &PromptBuilder,
        recorder: &mut TraceRecorder,
        parse_failures: &mut usize,
        oracle: &dyn IReasoningOracle,
    ) -> LoopState {
        let request = OracleRequest {
            messages: prompts.messages(recorder.records()),
            timeout: self.oracle_timeout,
            cancellation: self.cancellation.clone(),
        };

        let completion = match call_with_retry(oracle, &request, &self.retry, self.sleeper.as_ref()) {
            Ok(completion) => completion,
            Err(OracleError::Cancelled) => return LoopState::Aborted(AbortReason::Cancelled),
            Err(e) => {
                return LoopState::Aborted(AbortReason::OracleUnavailable {
                    last_error: e.to_string(),
                })
            }
        };
        recorder.record_assistant(&completion);
        if self.cancellation.is_cancelled() {
            return LoopState::Aborted(AbortReason::Cancelled);
        }

        match parse_reply(&completion.content) {
            Ok(OracleReply::Action(call)) => {
                *parse_failures = 0;
                debug!(turn, action = call.name(), "action selected");
                LoopState::ExecutingAction(call)
            }
            Ok(OracleReply::Decision(result)) => LoopState::Decided(result),
            Err(e) => {
                *parse_failures += 1;
                events::response_unparseable(turn as u32, *parse_failures as u32, &e.to_string());
                if *parse_failures > self.agent.parse_retries {
                    LoopState::Aborted(AbortReason::UnparseableResponse)
                } else {
                    recorder.record_user(clarification_message(&e.to_string()));
                    LoopState::AwaitingAction
                }
            }
        }
    }

    fn budget_exhausted(&self, started: Instant, recorder: &TraceRecorder) -> Option<AbortReason> {
        if self.cancellation.is_cancelled() {
            return Some(AbortReason::Cancelled);
        }
        if let Some(secs) = self.agent.session_budget_secs {
            if started.elapsed() >= Duration::from_secs(secs) {
                return Some(AbortReason::SessionBudgetExceeded);
            }
        }
        if let Some(max_cost) = self.agent.max_cost {
            if recorder.total_cost() >= max_cost {
                return Some(AbortReason::CostBudgetExceeded);
            }
        }
        None
    }
}

impl Default for AgentLoop {
    fn default() -> Self {
        Self::new(&SleuthConfig::default())
    }
}

impl std::fmt::Debug for AgentLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentLoop")
            .field("agent", &self.agent)
            .field("retry", &self.retry)
            .field("oracle_timeout", &self.oracle_timeout)
            .finish_non_exhaustive()
    }
}
