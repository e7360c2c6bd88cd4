//! Request validation errors.

/// Reasons an inbound format request is rejected before any upstream work.
///
/// The display text is the client-facing error message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// `code` is absent or empty
    #[display("Missing 'code' in request body.")]
    MissingCode,
    /// `context` is absent or empty
    #[display("Missing 'context' in request body.")]
    MissingContext,
    /// `context` is not a recognized script kind
    #[display("Invalid 'context' in request body: {}.", _0)]
    InvalidContext(String),
    /// The body could not be decoded as a format request
    #[display("Invalid JSON body.")]
    MalformedBody(String),
    /// The body exceeds the accepted request size
    #[display("Request body is too large.")]
    BodyTooLarge(String),
}

/// Validation error with source location.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Validation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for ValidationError {}
