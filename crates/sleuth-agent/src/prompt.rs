//! Prompt assembly for the reasoning oracle.

use sleuth_core::models::{ActionSpec, OracleMessage, Role, TraceRecord};

const SYSTEM_PREAMBLE: &str = "You validate a hypothesis against a causal graph of claims. \
Each node is a claim with an id and description; an edge A -> B means A causally precedes or produces B. \
Explore the graph one action at a time, then decide whether the evidence supports the hypothesis.";

const RESPONSE_FORMAT: &str = "Reply with exactly one JSON object and nothing else.\n\
To run an action: {\"action\": \"<name>\", \"args\": {...}}\n\
To finish: {\"decision\": \"ACCEPT\" | \"REFINE\" | \"REJECT\", \"explanation\": \"...\", \"new_hypothesis\": \"...\"}\n\
`new_hypothesis` is required for REFINE and ignored otherwise.";

/// Builds the message sequence sent on each turn.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system: String,
}

impl PromptBuilder {
    pub fn new(specs: &[ActionSpec]) -> Self {
        let mut system = String::from(SYSTEM_PREAMBLE);
        system.push_str("\n\nAvailable actions:\n");
        for spec in specs {
            system.push_str(&format!(
                "- {}: {}\n  args schema: {}\n",
                spec.name, spec.description, spec.parameters
            ));
        }
        system.push('\n');
        system.push_str(RESPONSE_FORMAT);
        Self { system }
    }

    /// System message sent first on every turn.
    pub fn system_prompt(&self) -> &str {
        &self.system
    }

    /// System prompt followed by the trace replayed as a conversation.
    pub fn messages(&self, trace: &[TraceRecord]) -> Vec<OracleMessage> {
        let mut messages = Vec::with_capacity(trace.len() + 1);
        messages.push(OracleMessage::system(self.system.clone()));
        for record in trace {
            let content = record.content.clone().unwrap_or_default();
            messages.push(match record.role {
                Role::User => OracleMessage::user(content),
                Role::Assistant => OracleMessage::assistant(content),
            });
        }
        messages
    }
}

/// Opening user message carrying the hypothesis.
pub fn hypothesis_message(hypothesis: &str) -> String {
    format!("Hypothesis: {hypothesis}\nChoose your first action.")
}

/// Follow-up sent after an unparseable response.
pub fn clarification_message(error: &str) -> String {
    format!(
        "Your previous reply could not be parsed ({error}). {RESPONSE_FORMAT}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sleuth_core::models::{MessageRole, OracleCompletion};

    use crate::trace::TraceRecorder;

    #[test]
    fn system_prompt_lists_every_action() {
        let specs = vec![ActionSpec {
            name: "causes".into(),
            description: "parents".into(),
            parameters: json!({"type": "object"}),
        }];
        let builder = PromptBuilder::new(&specs);
        assert!(builder.system_prompt().contains("- causes: parents"));
        assert!(builder.system_prompt().contains("\"decision\""));
    }

    #[test]
    fn trace_is_replayed_in_order() {
        let mut recorder = TraceRecorder::new();
        recorder.record_user(hypothesis_message("rain causes mud"));
        recorder.record_assistant(&OracleCompletion::new("{}", 0.1));
        let messages = PromptBuilder::new(&[]).messages(recorder.records());
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
        assert!(messages[1].content.contains("rain causes mud"));
    }
}
