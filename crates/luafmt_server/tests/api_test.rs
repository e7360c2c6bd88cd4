//! Relay handler tests with a scripted formatter backend.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeBehavior, FakeFormatter, post_format, router_with, router_with_timeout, send};
use luafmt_core::{FormatOptions, ScriptContext, build_prompt};
use luafmt_error::UpstreamErrorKind;
use luafmt_server::MAX_BODY_BYTES;
use serde_json::json;
use std::time::Duration;

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_formatted_code_is_returned_verbatim() {
    let formatter = FakeFormatter::replying("if (x) then\n    print(x)\nend");
    let router = router_with(formatter.clone());

    let (status, body) = post_format(
        router,
        r#"{"code":"if x then print(x) end","context":"Script"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "formattedCode": "if (x) then\n    print(x)\nend" }));
    assert_eq!(formatter.calls(), 1);
}

#[tokio::test]
async fn test_backend_receives_built_prompt() {
    let formatter = FakeFormatter::replying("ok");
    let router = router_with(formatter.clone());

    let (status, _) = post_format(
        router,
        r#"{"code":"local a = b and c or d","context":"LocalScript","options":{"useAlwaysParentheses":false,"preferAndOrIdiom":true}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let expected = build_prompt(
        "local a = b and c or d",
        Some(ScriptContext::LocalScript),
        &FormatOptions {
            use_always_parentheses: false,
            prefer_and_or_idiom: true,
        },
    );
    assert_eq!(formatter.last_prompt(), Some(expected));
}

#[tokio::test]
async fn test_missing_options_use_defaults() {
    let formatter = FakeFormatter::replying("ok");
    let router = router_with(formatter.clone());

    post_format(router, r#"{"code":"x = 1","context":"ModuleScript"}"#).await;

    let expected = build_prompt("x = 1", Some(ScriptContext::ModuleScript), &FormatOptions::default());
    assert_eq!(formatter.last_prompt(), Some(expected));
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_missing_code_is_rejected_without_upstream_call() {
    let formatter = FakeFormatter::replying("unused");

    for body in [
        r#"{"context":"Script"}"#,
        r#"{"code":"","context":"Script"}"#,
        r#"{"code":null,"context":"Script"}"#,
        r#"{}"#,
    ] {
        let (status, reply) = post_format(router_with(formatter.clone()), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(reply, json!({ "error": "Missing 'code' in request body." }));
    }

    assert_eq!(formatter.calls(), 0);
}

#[tokio::test]
async fn test_missing_context_is_rejected() {
    let formatter = FakeFormatter::replying("unused");

    let (status, reply) =
        post_format(router_with(formatter.clone()), r#"{"code":"print(1)"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply, json!({ "error": "Missing 'context' in request body." }));
    assert_eq!(formatter.calls(), 0);
}

#[tokio::test]
async fn test_unknown_context_is_rejected() {
    let formatter = FakeFormatter::replying("unused");

    let (status, reply) = post_format(
        router_with(formatter.clone()),
        r#"{"code":"print(1)","context":"client"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = reply["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid 'context'"));
    assert!(error.contains("LocalScript"));
    assert_eq!(formatter.calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let formatter = FakeFormatter::replying("unused");

    let (status, reply) = post_format(router_with(formatter.clone()), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["error"], "Invalid JSON body.");
    assert!(!reply["details"].as_str().unwrap().is_empty());
    assert_eq!(formatter.calls(), 0);
}

#[tokio::test]
async fn test_wrongly_typed_option_is_rejected() {
    let formatter = FakeFormatter::replying("unused");

    let (status, reply) = post_format(
        router_with(formatter.clone()),
        r#"{"code":"x","context":"Script","options":{"useAlwaysParentheses":"yes"}}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(reply["error"], "Invalid JSON body.");
    assert_eq!(formatter.calls(), 0);
}

#[tokio::test]
async fn test_large_script_within_limit_is_accepted() {
    let formatter = FakeFormatter::replying("ok");
    let code = "x".repeat(3 * 1024 * 1024);
    let body = json!({ "code": code, "context": "Script" }).to_string();

    let (status, reply) = post_format(router_with(formatter.clone()), &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["formattedCode"], "ok");
    assert_eq!(formatter.calls(), 1);
}

#[tokio::test]
async fn test_oversized_body_is_rejected_as_too_large() {
    let formatter = FakeFormatter::replying("unused");
    let code = "x".repeat(MAX_BODY_BYTES + 1);
    let body = json!({ "code": code, "context": "Script" }).to_string();

    let (status, reply) = post_format(router_with(formatter.clone()), &body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(reply["error"], "Request body is too large.");
    assert!(!reply["details"].as_str().unwrap().is_empty());
    assert_eq!(formatter.calls(), 0);
}

// ============================================================================
// Upstream failures
// ============================================================================

#[tokio::test]
async fn test_invalid_shape_maps_to_bad_gateway() {
    let raw = json!({ "candidates": [] });
    let formatter = FakeFormatter::new(FakeBehavior::Fail(UpstreamErrorKind::InvalidShape {
        body: raw.clone(),
    }));

    let (status, reply) = post_format(
        router_with(formatter),
        r#"{"code":"print(1)","context":"Script"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(
        reply,
        json!({
            "error": "Invalid response structure from upstream API.",
            "response": raw
        })
    );
}

#[tokio::test]
async fn test_transport_failure_maps_to_internal_error() {
    let formatter = FakeFormatter::new(FakeBehavior::Fail(UpstreamErrorKind::Transport(
        "error sending request: connection refused".to_string(),
    )));

    let (status, reply) = post_format(
        router_with(formatter),
        r#"{"code":"print(1)","context":"Script"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply["error"], "Failed to format code.");
    let details = reply["details"].as_str().unwrap();
    assert!(details.contains("connection refused"));
}

#[tokio::test]
async fn test_status_failure_details_use_upstream_message() {
    let formatter = FakeFormatter::new(FakeBehavior::Fail(UpstreamErrorKind::Status {
        status_code: 403,
        body: json!({ "error": { "code": 403, "message": "Permission denied", "status": "PERMISSION_DENIED" } }),
    }));

    let (status, reply) = post_format(
        router_with(formatter),
        r#"{"code":"print(1)","context":"Script"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply["details"], "Permission denied");
}

#[tokio::test]
async fn test_stalled_backend_is_cut_off() {
    let formatter = FakeFormatter::new(FakeBehavior::Stall(Duration::from_secs(30)));
    let router = router_with_timeout(formatter.clone(), Duration::from_millis(50));

    let started = std::time::Instant::now();
    let (status, reply) =
        post_format(router, r#"{"code":"print(1)","context":"Script"}"#).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply["details"], "Upstream request timed out after 50 ms");
    assert_eq!(formatter.calls(), 1);
}

#[tokio::test]
async fn test_panic_is_caught_by_fallback_handler() {
    let formatter = FakeFormatter::new(FakeBehavior::Panic);

    let (status, reply) = post_format(
        router_with(formatter),
        r#"{"code":"print(1)","context":"Script"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply["error"], "Internal Server Error");
    assert_eq!(reply["details"], "formatter exploded");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let router = router_with(FakeFormatter::replying("unused"));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, reply) = send(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply, json!({ "status": "healthy" }));
}
