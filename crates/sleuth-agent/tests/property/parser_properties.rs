//! Property tests for oracle response parsing.

use proptest::prelude::*;

use sleuth_agent::{parse_reply, OracleReply};
use sleuth_core::models::{ActionCall, Decision, SimilarityQuery};

fn node_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn action_call() -> impl Strategy<Value = ActionCall> {
    prop_oneof![
        (
            prop_oneof![
                "[a-z ]{1,20}".prop_map(SimilarityQuery::Text),
                prop::collection::vec(-1.0f32..1.0, 1..6).prop_map(SimilarityQuery::Embedding),
            ],
            prop::option::of(1usize..20),
        )
            .prop_map(|(query, top_k)| ActionCall::SimilarNodes { query, top_k }),
        node_id().prop_map(|node_id| ActionCall::Causes { node_id }),
        node_id().prop_map(|node_id| ActionCall::Effects { node_id }),
        (node_id(), node_id()).prop_map(|(source_id, target_id)| ActionCall::CausalChain {
            source_id,
            target_id
        }),
        (node_id(), node_id()).prop_map(|(source_id, target_id)| ActionCall::Connect {
            source_id,
            target_id
        }),
    ]
}

fn wrap(json: &str, style: u8) -> String {
    match style {
        0 => json.to_string(),
        1 => format!("Next I will look at this.\n{json}\nThat should help."),
        2 => format!("```json\n{json}\n```"),
        _ => format!("  \n{json}\n  "),
    }
}

proptest! {
    #[test]
    fn serialized_calls_parse_back(call in action_call(), style in 0u8..4) {
        let json = serde_json::to_string(&call).unwrap();
        let reply = parse_reply(&wrap(&json, style)).unwrap();
        prop_assert_eq!(reply, OracleReply::Action(call));
    }

    #[test]
    fn decisions_parse_in_any_case(
        word in prop::sample::select(vec!["accept", "Accept", "ACCEPT", "reject", "Reject", "REJECT"]),
        explanation in "[a-zA-Z ,.]{0,40}",
    ) {
        let text = serde_json::json!({ "decision": word, "explanation": explanation }).to_string();
        match parse_reply(&text).unwrap() {
            OracleReply::Decision(result) => {
                let expected: Decision = word.parse().unwrap();
                prop_assert_eq!(result.decision, expected);
                prop_assert_eq!(result.explanation, explanation);
                prop_assert!(result.new_hypothesis.is_none());
            }
            other => prop_assert!(false, "expected decision, got {:?}", other),
        }
    }

    #[test]
    fn arbitrary_text_never_panics(text in ".{0,200}") {
        let _ = parse_reply(&text);
    }

    #[test]
    fn text_without_braces_is_no_json(text in "[^{}]{0,100}") {
        prop_assert!(parse_reply(&text).is_err());
    }
}
