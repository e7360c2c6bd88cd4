//! Test utilities for the relay server tests.
//!
//! Provides a scripted [`CodeFormatter`] and request helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use luafmt_error::{UpstreamError, UpstreamErrorKind};
use luafmt_interface::CodeFormatter;
use luafmt_server::{ApiState, create_router};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// What the fake backend does when called.
#[derive(Debug, Clone)]
pub enum FakeBehavior {
    /// Return this text
    Reply(String),
    /// Fail with this error kind
    Fail(UpstreamErrorKind),
    /// Sleep, then reply with "late"
    Stall(Duration),
    /// Panic inside the call
    Panic,
}

/// Scripted formatter that records every prompt it receives.
#[derive(Debug)]
pub struct FakeFormatter {
    behavior: FakeBehavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeFormatter {
    pub fn new(behavior: FakeBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(text: &str) -> Arc<Self> {
        Self::new(FakeBehavior::Reply(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CodeFormatter for FakeFormatter {
    async fn format_code(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.behavior {
            FakeBehavior::Reply(text) => Ok(text.clone()),
            FakeBehavior::Fail(kind) => Err(UpstreamError::new(kind.clone())),
            FakeBehavior::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("late".to_string())
            }
            FakeBehavior::Panic => panic!("formatter exploded"),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Router backed by `formatter` with a generous timeout.
pub fn router_with(formatter: Arc<FakeFormatter>) -> Router {
    router_with_timeout(formatter, Duration::from_secs(5))
}

pub fn router_with_timeout(formatter: Arc<FakeFormatter>, timeout: Duration) -> Router {
    create_router(ApiState::new(formatter, timeout))
}

/// POST a raw body to `/format-lua` and decode the JSON reply.
pub async fn post_format(router: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/format-lua")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request");
    send(router, request).await
}

/// Send any request and decode the JSON reply.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let value = serde_json::from_slice(&bytes).expect("JSON body");
    (status, value)
}
