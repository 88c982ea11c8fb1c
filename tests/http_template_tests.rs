//! Integration tests for template construction and the public value types.
//!
//! These tests verify configuration, the response value type, status
//! classification, and error surfaces without touching the network.

use std::time::Duration;

use http_template::{
    is_read_failed, is_write_retryable, ConfigError, Headers, HttpError, HttpTemplate,
    RequestFailedError, Response, RetriesExhaustedError, RetryPolicy, RetryableStatusError,
    StatusClass, WaitStrategy, APPLICATION_JSON,
};

// ============================================================================
// Construction and configuration
// ============================================================================

#[test]
fn test_default_template_configuration() {
    let template = HttpTemplate::new();

    assert_eq!(template.content_type(), APPLICATION_JSON);
    assert_eq!(template.accept_type(), APPLICATION_JSON);
    assert_eq!(template.retry_policy().max_attempts, 5);
    assert_eq!(
        template.retry_policy().wait,
        WaitStrategy::Fixed(Duration::from_secs(1))
    );
    assert!(template.has_codec());
}

#[test]
fn test_builder_configures_all_fields() {
    let template = HttpTemplate::builder()
        .client(reqwest::Client::new())
        .content_type("application/awesome")
        .accept_type("*/*")
        .retry_policy(RetryPolicy {
            max_attempts: 3,
            wait: WaitStrategy::ExponentialBackoff {
                initial: Duration::from_millis(250),
                max: Duration::from_secs(8),
            },
            ..RetryPolicy::default()
        })
        .build()
        .unwrap();

    assert_eq!(template.content_type(), "application/awesome");
    assert_eq!(template.accept_type(), "*/*");
    assert_eq!(template.retry_policy().max_attempts, 3);
}

#[test]
fn test_build_rejects_zero_attempt_policy() {
    let result = HttpTemplate::builder()
        .retry_policy(RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        })
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::NoAttemptsAllowed { attempts: 0 })
    ));
}

#[tokio::test]
async fn test_typed_operations_without_codec_fail_before_any_network_call() {
    let template = HttpTemplate::builder().without_codec().build().unwrap();

    // `.invalid` is reserved and never resolves; a Config error proves no
    // request was attempted.
    let get_result: Result<serde_json::Value, _> =
        template.get_json("http://nowhere.invalid/").await;
    assert!(matches!(
        get_result,
        Err(HttpError::Config(ConfigError::MissingCodec))
    ));

    let post_result = template
        .post("http://nowhere.invalid/", &serde_json::json!({"a": 1}))
        .await;
    assert!(matches!(
        post_result,
        Err(HttpError::Config(ConfigError::MissingCodec))
    ));
}

#[test]
fn test_template_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTemplate>();
}

// ============================================================================
// Status classification
// ============================================================================

#[test]
fn test_read_success_band_over_all_codes() {
    for code in 0..=999u16 {
        let expected_success = (200..=204).contains(&code);
        assert_eq!(
            !is_read_failed(code),
            expected_success,
            "read predicate disagrees at {code}"
        );
    }
}

#[test]
fn test_write_retry_band_over_all_codes() {
    for code in 0..=999u16 {
        let expected_retryable = (502..=504).contains(&code);
        assert_eq!(
            is_write_retryable(code),
            expected_retryable,
            "retry predicate disagrees at {code}"
        );
    }
}

#[test]
fn test_status_class_matches_both_predicates() {
    assert_eq!(StatusClass::of(204), StatusClass::Success);
    assert_eq!(StatusClass::of(404), StatusClass::ClientFailure);
    assert_eq!(StatusClass::of(500), StatusClass::ClientFailure);
    assert_eq!(StatusClass::of(504), StatusClass::Retryable);
}

// ============================================================================
// Response value type
// ============================================================================

#[test]
fn test_response_round_trip() {
    let mut headers = Headers::new();
    headers.append("foo", "bar");
    headers.append("bar", "baz");

    let response = Response::new(200, "any old body", headers.clone());

    assert_eq!(response.code(), 200);
    assert_eq!(response.body(), b"any old body");
    assert_eq!(response.body_string(), "any old body");
    assert_eq!(response.headers(), &headers);
    assert_eq!(response.headers().get("foo"), Some("bar"));
    assert_eq!(response.headers().get("bar"), Some("baz"));
}

#[test]
fn test_response_equality_is_structural() {
    let make = |code: u16, body: &str| {
        let mut headers = Headers::new();
        headers.append("foo", "bar");
        Response::new(code, body, headers)
    };

    assert_eq!(make(200, "body"), make(200, "body"));
    assert_ne!(make(200, "body"), make(201, "body"));
    assert_ne!(make(200, "body"), make(200, "other"));
}

#[test]
fn test_headers_preserve_duplicates_and_order() {
    let mut headers = Headers::new();
    headers.append("Via", "proxy-a");
    headers.append("foo", "bar");
    headers.append("Via", "proxy-b");

    assert_eq!(
        headers.get_all("via").collect::<Vec<_>>(),
        ["proxy-a", "proxy-b"]
    );
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        [("Via", "proxy-a"), ("foo", "bar"), ("Via", "proxy-b")]
    );
}

// ============================================================================
// Error surfaces
// ============================================================================

#[test]
fn test_error_types_provide_debugging_info() {
    let transient = RetryableStatusError {
        code: 503,
        method: "POST".to_string(),
        uri: "http://api.example.com/things".to_string(),
        message: "service unavailable".to_string(),
    };
    let message = transient.to_string();
    assert!(message.contains("503"));
    assert!(message.contains("http://api.example.com/things"));

    let exhausted = RetriesExhaustedError {
        attempts: 5,
        last: transient,
    };
    let message = exhausted.to_string();
    assert!(message.contains("exhausted 5 attempts"));
    assert!(message.contains("503"));

    let failed = RequestFailedError {
        code: 422,
        uri: "http://api.example.com/things".to_string(),
        response: Response::new(422, "unprocessable", Headers::new()),
    };
    let message = failed.to_string();
    assert!(message.contains("422"));
    assert!(message.contains("unprocessable"));
}

#[test]
fn test_http_error_variants_unify_the_taxonomy() {
    let config: HttpError = ConfigError::MissingCodec.into();
    assert!(matches!(config, HttpError::Config(_)));

    let failed: HttpError = RequestFailedError {
        code: 400,
        uri: String::new(),
        response: Response::new(400, Vec::new(), Headers::new()),
    }
    .into();
    assert!(matches!(failed, HttpError::Failed(_)));
}
