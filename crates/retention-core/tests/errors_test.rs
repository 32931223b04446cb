use retention_core::errors::*;

#[test]
fn transport_error_carries_endpoint_and_reason() {
    let err = AlertError::Transport {
        endpoint: "http://localhost:8080/alertas".into(),
        reason: "connection refused".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("/alertas"));
    assert!(msg.contains("connection refused"));
    assert!(err.is_transport());
}

#[test]
fn status_error_carries_status() {
    let err = AlertError::UnexpectedStatus {
        endpoint: "/alertas".into(),
        status: 503,
    };
    assert!(err.to_string().contains("503"));
    assert!(err.is_transport());
}

#[test]
fn malformed_payload_is_not_a_transport_failure() {
    let err = AlertError::MalformedPayload {
        reason: "expected value at line 1".into(),
    };
    assert!(!err.is_transport());
    assert_eq!(err.error_code(), "ALERT_MALFORMED");
}

// --- From impls ---

#[test]
fn alert_error_converts_to_retention_error() {
    let err: RetentionError = AlertError::ChannelClosed {
        channel: "push".into(),
    }
    .into();
    assert!(matches!(err, RetentionError::Alert(_)));
    assert_eq!(err.error_code(), "ALERT_CHANNEL_CLOSED");
    assert!(err.to_string().contains("push channel closed"));
}

#[test]
fn config_error_converts_to_retention_error() {
    let err: RetentionError = ConfigError::ValidationFailed {
        field: "feed.poll_interval_secs".into(),
        message: "must be greater than 0".into(),
    }
    .into();
    assert!(matches!(err, RetentionError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_INVALID");
}
