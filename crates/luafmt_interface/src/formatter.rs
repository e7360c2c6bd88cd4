//! Formatter backend trait.

use async_trait::async_trait;
use luafmt_error::UpstreamError;

/// A backend that turns an instruction prompt into formatted code.
///
/// Implementations make exactly one attempt per call.
#[async_trait]
pub trait CodeFormatter: Send + Sync {
    /// Submit `prompt` and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an [`UpstreamError`] for transport failures, non-success
    /// responses, or responses that carry no text.
    async fn format_code(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// Backend name used in log fields.
    fn name(&self) -> &str;
}

