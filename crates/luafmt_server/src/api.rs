//! HTTP API for the formatting relay.

use crate::response::{ApiError, FormatResponse, handle_panic};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use luafmt_core::FormatRequestBody;
use luafmt_error::{UpstreamError, UpstreamErrorKind, ValidationError, ValidationErrorKind};
use luafmt_interface::CodeFormatter;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, info, instrument};

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct ApiState {
    /// Formatter backend
    formatter: Arc<dyn CodeFormatter>,
    /// Deadline for one backend call
    upstream_timeout: Duration,
}

impl ApiState {
    /// Creates a new API state.
    pub fn new(formatter: Arc<dyn CodeFormatter>, upstream_timeout: Duration) -> Self {
        Self {
            formatter,
            upstream_timeout,
        }
    }
}

/// Creates the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/format-lua", post(format_lua))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Format Lua code through the formatter backend.
#[instrument(skip_all)]
async fn format_lua(
    State(state): State<ApiState>,
    payload: Result<Json<FormatRequestBody>, JsonRejection>,
) -> Result<Json<FormatResponse>, ApiError> {
    let Json(body) = payload.map_err(rejection_error)?;
    let request = body.validate()?;
    let prompt = request.prompt();

    debug!(
        backend = state.formatter.name(),
        context = %request.context(),
        code_bytes = request.code().len(),
        prompt_bytes = prompt.len(),
        "Forwarding format request"
    );

    let formatted = tokio::time::timeout(
        state.upstream_timeout,
        state.formatter.format_code(&prompt),
    )
    .await
    .map_err(|_| {
        UpstreamError::new(UpstreamErrorKind::Timeout {
            after_ms: state.upstream_timeout.as_millis() as u64,
        })
    })??;

    info!(
        backend = state.formatter.name(),
        context = %request.context(),
        formatted_bytes = formatted.len(),
        "Formatted code"
    );

    Ok(Json(FormatResponse::new(formatted)))
}

/// Classify a body extraction failure by the status axum assigned to it.
fn rejection_error(rejection: JsonRejection) -> ValidationError {
    let detail = rejection.body_text();
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ValidationError::new(ValidationErrorKind::BodyTooLarge(detail))
    } else {
        ValidationError::new(ValidationErrorKind::MalformedBody(detail))
    }
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
