//! luafmt server - formats Lua code for Roblox Studio through Gemini.
//!
//! Configuration comes from the environment (and `.env`, when present).
//! The process exits with status 1 before binding if `API_KEY` is unset.

use luafmt_core::{LogFormat, init_observability};
use luafmt_server::{ServerConfig, run};
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();

    if let Err(e) = init_observability("luafmt-server", LogFormat::from_env()) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Refusing to start without valid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(config = ?config, "Configuration loaded");

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server terminated");
            ExitCode::FAILURE
        }
    }
}
