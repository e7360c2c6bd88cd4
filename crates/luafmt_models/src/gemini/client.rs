//! HTTP client for the Gemini `generateContent` endpoint.

use crate::gemini::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use derive_getters::Getters;
use luafmt_error::{UpstreamError, UpstreamErrorKind};
use luafmt_interface::CodeFormatter;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default deadline for a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`GeminiClient`].
#[derive(Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter
    api_key: String,
    /// Model identifier
    #[builder(default = "DEFAULT_MODEL.to_string()")]
    model: String,
    /// API root, without trailing `/models`
    #[builder(default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Deadline for one request, including reading the body
    #[builder(default = "DEFAULT_TIMEOUT")]
    timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new builder for GeminiConfig.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Config with every field given explicitly.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Full `generateContent` URL, without the key.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for Gemini text generation.
///
/// One POST per call, no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamErrorKind::ClientCreation`] if the HTTP client cannot be built.
    #[instrument(skip_all, fields(model = %config.model(), timeout_ms = config.timeout().as_millis() as u64))]
    pub fn new(config: GeminiConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| {
                error!(error = ?e, "Failed to build HTTP client");
                UpstreamError::new(UpstreamErrorKind::ClientCreation(e.to_string()))
            })?;

        debug!(url = %config.endpoint(), "Created Gemini client");

        Ok(Self { client, config })
    }

    /// Returns the connection settings.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Send `request` and extract the first candidate's text.
    ///
    /// # Errors
    ///
    /// - [`UpstreamErrorKind::Timeout`] when the deadline elapses
    /// - [`UpstreamErrorKind::Transport`] on connection or body read failures
    /// - [`UpstreamErrorKind::Status`] for non-2xx responses
    /// - [`UpstreamErrorKind::InvalidShape`] when the text is missing
    #[instrument(skip(self, request), fields(model = %self.config.model()))]
    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<String, UpstreamError> {
        debug!(contents = request.contents().len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key())])
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!(status = %status, body = %text, "Gemini API error");
            return Err(UpstreamError::new(UpstreamErrorKind::Status {
                status_code: status.as_u16(),
                body: parse_body(&text),
            }));
        }

        let body = parse_body(&text);
        let parsed: Option<GenerateContentResponse> = serde_json::from_value(body.clone()).ok();
        match parsed.as_ref().and_then(GenerateContentResponse::first_text) {
            Some(text) => {
                debug!(chars = text.len(), "Received generated text");
                Ok(text.to_string())
            }
            None => {
                warn!(body = %body, "Gemini response has no candidate text");
                Err(UpstreamError::new(UpstreamErrorKind::InvalidShape { body }))
            }
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> UpstreamError {
        // The request URL carries the API key.
        let e = e.without_url();
        if e.is_timeout() {
            error!(error = ?e, "Gemini request timed out");
            UpstreamError::new(UpstreamErrorKind::Timeout {
                after_ms: self.config.timeout().as_millis() as u64,
            })
        } else {
            error!(error = ?e, "Gemini request failed");
            UpstreamError::new(UpstreamErrorKind::Transport(e.to_string()))
        }
    }
}

#[async_trait]
impl CodeFormatter for GeminiClient {
    async fn format_code(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.generate(&GenerateContentRequest::from_prompt(prompt))
            .await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Parse a response body as JSON, keeping the raw text when it is not JSON.
fn parse_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
