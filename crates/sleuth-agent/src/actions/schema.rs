use serde_json::json;
use sleuth_core::constants::{
    ACTION_CAUSAL_CHAIN, ACTION_CAUSES, ACTION_CONNECT, ACTION_EFFECTS, ACTION_SIMILAR_NODES,
};
use sleuth_core::models::ActionSpec;

fn spec(name: &str, description: &str, parameters: serde_json::Value) -> ActionSpec {
    ActionSpec {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

fn node_pair() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "source_id": { "type": "string" },
            "target_id": { "type": "string" }
        },
        "required": ["source_id", "target_id"]
    })
}

fn single_node() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": { "node_id": { "type": "string" } },
        "required": ["node_id"]
    })
}

pub(super) fn action_specs(default_top_k: usize, max_top_k: usize) -> Vec<ActionSpec> {
    vec![
        spec(
            ACTION_SIMILAR_NODES,
            "Find the nodes whose meaning is closest to a text query or embedding.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "oneOf": [
                            { "type": "string" },
                            { "type": "array", "items": { "type": "number" } }
                        ]
                    },
                    "top_k": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": max_top_k,
                        "default": default_top_k
                    }
                },
                "required": ["query"]
            }),
        ),
        spec(
            ACTION_CAUSES,
            "List the direct causes (parents) of a node.",
            single_node(),
        ),
        spec(
            ACTION_EFFECTS,
            "List the direct effects (children) of a node.",
            single_node(),
        ),
        spec(
            ACTION_CAUSAL_CHAIN,
            "Find the shortest chain of causal edges leading from source to target.",
            node_pair(),
        ),
        spec(
            ACTION_CONNECT,
            "Record a new causal edge from source to target. Permanent.",
            node_pair(),
        ),
    ]
}
