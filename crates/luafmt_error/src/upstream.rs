//! Errors raised while talking to the text-generation API.

use serde_json::Value;

/// Upstream failure conditions.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum UpstreamErrorKind {
    /// Failed to construct the HTTP client
    #[display("Failed to create upstream client: {}", _0)]
    ClientCreation(String),
    /// Connection, TLS or I/O failure before a response arrived
    #[display("Upstream request failed: {}", _0)]
    Transport(String),
    /// No response within the configured deadline
    #[display("Upstream request timed out after {} ms", after_ms)]
    Timeout {
        /// Deadline that elapsed, in milliseconds
        after_ms: u64,
    },
    /// Non-2xx response
    #[display("Upstream returned HTTP {}", status_code)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body, parsed as JSON when possible, otherwise a JSON string
        body: Value,
    },
    /// 2xx response without text at `candidates[0].content.parts[0].text`
    #[display("Upstream response is missing candidate text")]
    InvalidShape {
        /// Raw response body, parsed as JSON when possible, otherwise a JSON string
        body: Value,
    },
}

impl UpstreamErrorKind {
    /// Message reported by the upstream in its own error envelope.
    ///
    /// Reads `error.message` from a JSON error body, the shape Google APIs use.
    ///
    /// # Examples
    ///
    /// ```
    /// use luafmt_error::UpstreamErrorKind;
    /// use serde_json::json;
    ///
    /// let kind = UpstreamErrorKind::Status {
    ///     status_code: 400,
    ///     body: json!({ "error": { "code": 400, "message": "API key not valid." } }),
    /// };
    /// assert_eq!(kind.upstream_message(), Some("API key not valid."));
    /// ```
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            UpstreamErrorKind::Status { body, .. } | UpstreamErrorKind::InvalidShape { body } => body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .filter(|msg| !msg.is_empty()),
            _ => None,
        }
    }

    /// Upstream body attached to this error, if any and not blank.
    pub fn body(&self) -> Option<&Value> {
        match self {
            UpstreamErrorKind::Status { body, .. } | UpstreamErrorKind::InvalidShape { body } => {
                match body {
                    Value::Null => None,
                    Value::String(s) if s.trim().is_empty() => None,
                    other => Some(other),
                }
            }
            _ => None,
        }
    }
}

/// Upstream error with source location tracking.
///
/// # Examples
///
/// ```
/// use luafmt_error::{UpstreamError, UpstreamErrorKind};
///
/// let err = UpstreamError::new(UpstreamErrorKind::Transport("connection refused".into()));
/// assert!(err.to_string().contains("connection refused"));
/// ```
#[derive(Debug, Clone)]
pub struct UpstreamError {
    /// The kind of error that occurred
    pub kind: UpstreamErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl UpstreamError {
    /// Create a new UpstreamError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: UpstreamErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Upstream Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for UpstreamError {}
