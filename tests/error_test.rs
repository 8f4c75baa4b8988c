use std::time::Duration;

use scholia::{Result, ScholiaError};

#[test]
fn test_error_display() {
    let err = ScholiaError::ChainExhausted { attempts: 9 };
    assert!(err.to_string().contains('9'));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(ScholiaError::NoProvider)
    }
    assert!(returns_error().is_err());
}

#[test]
fn test_json_error_converts() {
    fn parse() -> Result<serde_json::Value> {
        Ok(serde_json::from_str("{oops")?)
    }
    assert!(matches!(parse(), Err(ScholiaError::Json(_))));
}

// ============================================================================
// Status mapping
// ============================================================================

#[test]
fn status_401_and_403_are_auth_failures() {
    for status in [401, 403] {
        assert!(matches!(
            ScholiaError::from_status(status, "nope", None),
            ScholiaError::AuthenticationFailed
        ));
    }
}

#[test]
fn status_429_keeps_retry_hint() {
    let err = ScholiaError::from_status(429, "slow down", Some(Duration::from_secs(3)));
    assert_eq!(err.retry_after(), Some(Duration::from_secs(3)));
}

#[test]
fn other_statuses_are_api_errors() {
    let err = ScholiaError::from_status(404, "missing model", None);
    match err {
        ScholiaError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "missing model");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

// ============================================================================
// Transient error classification
// ============================================================================

#[test]
fn transient_errors() {
    assert!(ScholiaError::RateLimited { retry_after: None }.is_transient());
    assert!(ScholiaError::Http("connection reset".into()).is_transient());
    assert!(ScholiaError::Timeout(Duration::from_millis(50)).is_transient());
    assert!(ScholiaError::EmptyResponse.is_transient());
    assert!(
        ScholiaError::Api {
            status: 503,
            message: "unavailable".into()
        }
        .is_transient()
    );
}

#[test]
fn permanent_errors() {
    assert!(!ScholiaError::AuthenticationFailed.is_transient());
    assert!(!ScholiaError::NoProvider.is_transient());
    assert!(!ScholiaError::MalformedSummary("x".into()).is_transient());
    assert!(
        !ScholiaError::Api {
            status: 400,
            message: "bad request".into()
        }
        .is_transient()
    );
    assert_eq!(ScholiaError::AuthenticationFailed.retry_after(), None);
}
