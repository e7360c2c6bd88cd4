//! Tracing subscriber initialization.

use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Output format for log lines written to stderr.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` from the environment, falling back to [`LogFormat::Text`].
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Install the global tracing subscriber.
///
/// Log lines go to stderr. Filtering follows `RUST_LOG`, defaulting to
/// `info` when unset or unparseable.
///
/// Returns an error if a global subscriber is already installed.
#[instrument(skip_all, fields(service_name = service_name, format = %format))]
pub fn init_observability(service_name: &'static str, format: LogFormat) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;

    info!(service_name = service_name, %format, "Logging initialized");
    debug!("Tracing subscriber registered globally");
    Ok(())
}
