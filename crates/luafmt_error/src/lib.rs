//! Error types for the luafmt formatting relay.
//!
//! Every error struct records the file and line where it was created.

mod config;
mod server;
mod upstream;
mod validation;

pub use config::{ConfigError, ConfigErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use upstream::{UpstreamError, UpstreamErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum LuafmtErrorKind {
    /// Startup configuration error
    Config(ConfigError),
    /// Rejected inbound request
    Validation(ValidationError),
    /// Text-generation API failure
    Upstream(UpstreamError),
    /// Listener failure
    Server(ServerError),
}

impl std::fmt::Display for LuafmtErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LuafmtErrorKind::Config(e) => write!(f, "{}", e),
            LuafmtErrorKind::Validation(e) => write!(f, "{}", e),
            LuafmtErrorKind::Upstream(e) => write!(f, "{}", e),
            LuafmtErrorKind::Server(e) => write!(f, "{}", e),
        }
    }
}

/// luafmt error with kind discrimination.
#[derive(Debug)]
pub struct LuafmtError(Box<LuafmtErrorKind>);

impl LuafmtError {
    /// Create a new error from a kind.
    pub fn new(kind: LuafmtErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LuafmtErrorKind {
        &self.0
    }
}

impl std::fmt::Display for LuafmtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "luafmt Error: {}", self.0)
    }
}

impl std::error::Error for LuafmtError {}

impl<T> From<T> for LuafmtError
where
    T: Into<LuafmtErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for luafmt operations.
pub type LuafmtResult<T> = std::result::Result<T, LuafmtError>;
