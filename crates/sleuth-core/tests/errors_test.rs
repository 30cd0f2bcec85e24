use sleuth_core::errors::*;

#[test]
fn dangling_edge_names_the_missing_node() {
    let err = GraphError::DanglingEdge {
        source_id: "a".into(),
        target_id: "ghost".into(),
        missing: "ghost".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("a -> ghost"));
    assert!(msg.contains("missing node ghost"));
    assert!(err.is_build_error());
}

#[test]
fn unknown_node_is_not_a_build_error() {
    let err = GraphError::UnknownNode { id: "x".into() };
    assert!(!err.is_build_error());
    let wrapped: SleuthError = err.into();
    assert!(wrapped.is_unknown_node());
}

#[test]
fn dimension_mismatch_carries_values() {
    let err = IndexError::DimensionMismatch {
        id: "n7".into(),
        expected: 384,
        actual: 128,
    };
    let msg = err.to_string();
    assert!(msg.contains("n7"));
    assert!(msg.contains("384"));
    assert!(msg.contains("128"));
}

#[test]
fn only_cancellation_and_rejection_are_not_retryable() {
    assert!(OracleError::Timeout { after_ms: 10 }.is_retryable());
    assert!(OracleError::RateLimited {
        retry_after_ms: None
    }
    .is_retryable());
    assert!(OracleError::Transport {
        reason: "reset".into()
    }
    .is_retryable());
    assert!(OracleError::MalformedResponse {
        reason: "truncated".into()
    }
    .is_retryable());
    assert!(!OracleError::Cancelled.is_retryable());
    assert!(!OracleError::Rejected {
        status: 401,
        reason: "bad key".into()
    }
    .is_retryable());
}

#[test]
fn rate_limit_exposes_retry_after() {
    let err = OracleError::RateLimited {
        retry_after_ms: Some(2_000),
    };
    assert_eq!(err.retry_after_ms(), Some(2_000));
    assert_eq!(OracleError::Timeout { after_ms: 1 }.retry_after_ms(), None);
}

// --- From impls ---

#[test]
fn subsystem_errors_convert_to_sleuth_error() {
    let e: SleuthError = IndexError::DuplicateId { id: "a".into() }.into();
    assert!(matches!(e, SleuthError::Index(_)));

    let e: SleuthError = OracleError::Cancelled.into();
    assert!(matches!(e, SleuthError::Oracle(OracleError::Cancelled)));

    let e: SleuthError = ResponseParseError::NoJson.into();
    assert!(matches!(e, SleuthError::ResponseParse(_)));
}

#[test]
fn serde_errors_convert_to_sleuth_error() {
    let raw = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
    let e: SleuthError = raw.into();
    assert!(matches!(e, SleuthError::SerializationError(_)));
}
