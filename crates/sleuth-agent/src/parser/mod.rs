//! Oracle response parsing.
//!
//! Stage one is a strict `serde_json` parse of the trimmed text. If that
//! does not yield an object, stage two repairs the text (code fences,
//! surrounding prose, trailing commas, typographic quotes) and parses the
//! recovered object. Either stage ends in an [`OracleReply`] or a typed
//! [`ResponseParseError`]; there is no silent fallback.

pub mod recovery;

use serde_json::{json, Map, Value};
use sleuth_core::constants::{
    ACTION_CAUSAL_CHAIN, ACTION_CAUSES, ACTION_CONNECT, ACTION_EFFECTS, ACTION_SIMILAR_NODES,
};
use sleuth_core::errors::ResponseParseError;
use sleuth_core::models::{ActionCall, Decision, HypothesisValidationResult};

/// What the oracle asked for on one turn.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleReply {
    Action(ActionCall),
    Decision(HypothesisValidationResult),
}

/// Parse one oracle completion into an action or a terminal decision.
pub fn parse_reply(text: &str) -> Result<OracleReply, ResponseParseError> {
    let trimmed = text.trim();
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) {
        return interpret(&object);
    }

    let candidate = recovery::recover_object(trimmed).ok_or(ResponseParseError::NoJson)?;
    match serde_json::from_str::<Value>(&candidate) {
        Ok(Value::Object(object)) => interpret(&object),
        Ok(_) => Err(ResponseParseError::NoJson),
        Err(e) => Err(ResponseParseError::InvalidJson {
            reason: e.to_string(),
        }),
    }
}

fn interpret(object: &Map<String, Value>) -> Result<OracleReply, ResponseParseError> {
    let decision = object.get("decision");
    let action = action_parts(object);

    match (decision, action) {
        (Some(_), Some(_)) => Err(ResponseParseError::Ambiguous),
        (Some(decision), None) => parse_decision(decision, object).map(OracleReply::Decision),
        (None, Some((name, args))) => parse_action(&name, args).map(OracleReply::Action),
        (None, None) => Err(ResponseParseError::Unrecognized),
    }
}

/// Locate an action name and its arguments in any accepted wrapper shape:
/// `{"action", "args"}`, `{"tool_call": {"name", "args"}}` or `{"name"/"tool", "args"}`.
fn action_parts(object: &Map<String, Value>) -> Option<(String, Value)> {
    if let Some(Value::Object(call)) = object.get("tool_call") {
        return named(call, &["name", "tool", "action"]).map(|name| (name, arguments(call)));
    }
    if let Some(name) = named(object, &["action"]) {
        return Some((name, arguments(object)));
    }
    if object.contains_key("decision") {
        return None;
    }
    named(object, &["name", "tool"]).map(|name| (name, arguments(object)))
}

fn named(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn arguments(object: &Map<String, Value>) -> Value {
    let args = ["args", "arguments", "parameters"]
        .iter()
        .find_map(|key| object.get(*key))
        .cloned()
        .unwrap_or_else(|| json!({}));
    // Some oracles send arguments as a JSON-encoded string.
    match args {
        Value::String(encoded) => serde_json::from_str(&encoded).unwrap_or(Value::String(encoded)),
        other => other,
    }
}

/// Map a loosely written action name onto its canonical form.
pub fn canonical_action_name(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
    let canonical = match normalized.as_str() {
        "similar_nodes" | "similar" | "similarity" | "find_similar" | "search" => {
            ACTION_SIMILAR_NODES
        }
        "causes" | "parents" | "get_parents" | "get_causes" => ACTION_CAUSES,
        "effects" | "children" | "get_children" | "get_effects" => ACTION_EFFECTS,
        "causal_chain" | "chain" | "get_causal_chain" | "path" => ACTION_CAUSAL_CHAIN,
        "connect" | "connect_nodes" | "add_edge" => ACTION_CONNECT,
        _ => return None,
    };
    Some(canonical)
}

fn parse_action(name: &str, args: Value) -> Result<ActionCall, ResponseParseError> {
    let canonical = canonical_action_name(name).ok_or_else(|| ResponseParseError::UnknownAction {
        name: name.to_string(),
    })?;
    let args = match args {
        Value::Null => json!({}),
        other => other,
    };
    serde_json::from_value(json!({ "action": canonical, "args": args })).map_err(|e| {
        ResponseParseError::InvalidArguments {
            action: canonical.to_string(),
            reason: e.to_string(),
        }
    })
}

fn parse_decision(
    decision: &Value,
    object: &Map<String, Value>,
) -> Result<HypothesisValidationResult, ResponseParseError> {
    let decision: Decision = match decision.as_str() {
        Some(value) => value.parse()?,
        None => {
            return Err(ResponseParseError::UnknownDecision {
                value: decision.to_string(),
            })
        }
    };
    let explanation = named(object, &["explanation", "reason", "rationale"]).unwrap_or_default();
    let new_hypothesis = named(object, &["new_hypothesis", "refined_hypothesis"]);
    HypothesisValidationResult::new(decision, explanation, new_hypothesis)
}
