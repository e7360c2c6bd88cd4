//! Process configuration read once at startup.

use derive_getters::Getters;
use luafmt_error::{ConfigError, ConfigErrorKind};
use luafmt_models::gemini::{self, GeminiConfig};
use std::time::Duration;

/// Port used when `SERVER_PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Immutable server configuration.
#[derive(Clone, PartialEq, Eq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ServerConfig {
    /// Credential for the text-generation API
    api_key: String,
    /// Listen port
    #[builder(default = "DEFAULT_PORT")]
    port: u16,
    /// Model identifier
    #[builder(default = "gemini::DEFAULT_MODEL.to_string()")]
    model: String,
    /// API root URL
    #[builder(default = "gemini::DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    /// Deadline for one upstream call
    #[builder(default = "gemini::DEFAULT_TIMEOUT")]
    upstream_timeout: Duration,
}

impl ServerConfig {
    /// Creates a new builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `API_KEY` (required)
    /// - `SERVER_PORT` (default: 3000)
    /// - `GEMINI_MODEL` (default: "gemini-2.0-flash")
    /// - `GEMINI_API_BASE_URL` (default: the public v1beta root)
    /// - `UPSTREAM_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key =
            var("API_KEY").ok_or_else(|| ConfigError::new(ConfigErrorKind::MissingVar("API_KEY")))?;

        let port = match var("SERVER_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|e| {
                ConfigError::new(ConfigErrorKind::InvalidVar {
                    name: "SERVER_PORT",
                    value: value.clone(),
                    reason: e.to_string(),
                })
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::new(ConfigErrorKind::InvalidVar {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        value,
                        reason: "must be at least 1".to_string(),
                    }));
                }
                Err(e) => {
                    return Err(ConfigError::new(ConfigErrorKind::InvalidVar {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        value: value.clone(),
                        reason: e.to_string(),
                    }));
                }
            },
            None => gemini::DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_key,
            port,
            model: var("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            base_url: var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            upstream_timeout,
        })
    }

    /// Connection settings for the Gemini client.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(
            self.api_key.clone(),
            self.model.clone(),
            self.base_url.clone(),
            self.upstream_timeout,
        )
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("port", &self.port)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}
