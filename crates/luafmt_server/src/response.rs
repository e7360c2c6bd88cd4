//! Response bodies and error-to-HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use luafmt_error::{UpstreamError, UpstreamErrorKind, ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use tracing::{error, warn};

/// Successful format response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    /// Text returned by the formatter backend
    pub formatted_code: String,
}

impl FormatResponse {
    /// Wrap formatted code.
    pub fn new(formatted_code: impl Into<String>) -> Self {
        Self {
            formatted_code: formatted_code.into(),
        }
    }
}

/// JSON body for every failure response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-facing summary
    pub error: String,
    /// Diagnostic detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Raw upstream body for malformed upstream responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ErrorBody {
    /// An error body with only a summary.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            response: None,
        }
    }

    /// Attach diagnostic detail.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the raw upstream body.
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }
}

/// Failures the format handler can return.
#[derive(Debug, derive_more::From)]
pub enum ApiError {
    /// Rejected before any upstream call
    Validation(ValidationError),
    /// Formatter backend failure
    Upstream(UpstreamError),
}

impl ApiError {
    /// Status code and body for this error.
    pub fn to_parts(&self) -> (StatusCode, ErrorBody) {
        match self {
            ApiError::Validation(err) => {
                let body = ErrorBody::new(err.kind.to_string());
                match &err.kind {
                    ValidationErrorKind::MalformedBody(detail) => (
                        StatusCode::BAD_REQUEST,
                        body.with_details(Value::String(detail.clone())),
                    ),
                    ValidationErrorKind::BodyTooLarge(detail) => (
                        StatusCode::PAYLOAD_TOO_LARGE,
                        body.with_details(Value::String(detail.clone())),
                    ),
                    _ => (StatusCode::BAD_REQUEST, body),
                }
            }
            ApiError::Upstream(err) => match &err.kind {
                UpstreamErrorKind::InvalidShape { body } => (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody::new("Invalid response structure from upstream API.")
                        .with_response(body.clone()),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("Failed to format code.").with_details(upstream_details(err)),
                ),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(err) => warn!(error = %err, "Rejected format request"),
            ApiError::Upstream(err) => error!(error = %err, "Formatter backend failed"),
        }
        let (status, body) = self.to_parts();
        (status, Json(body)).into_response()
    }
}

/// Best-effort diagnostic for a failed upstream call.
///
/// Prefers the upstream's `error.message`, then its whole body, then the
/// error's own message. Never empty.
pub fn upstream_details(err: &UpstreamError) -> Value {
    if let Some(message) = err.kind.upstream_message() {
        return Value::String(message.to_string());
    }
    if let Some(body) = err.kind.body() {
        return body.clone();
    }
    Value::String(err.kind.to_string())
}

/// Fallback response for panics caught while handling a request.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(details = %details, "Request handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("Internal Server Error").with_details(Value::String(details))),
    )
        .into_response()
}
