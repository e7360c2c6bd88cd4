//! Listener bootstrap.

use crate::{ApiState, ServerConfig, create_router};
use luafmt_error::{LuafmtResult, ServerError, ServerErrorKind};
use luafmt_models::GeminiClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Build the Gemini-backed router, bind the configured port and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the port cannot be
/// bound, or the accept loop fails.
#[instrument(skip_all, fields(port = *config.port(), model = %config.model()))]
pub async fn run(config: ServerConfig) -> LuafmtResult<()> {
    let client = GeminiClient::new(config.gemini_config())?;
    let state = ApiState::new(Arc::new(client), *config.upstream_timeout());
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], *config.port()));
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })
    })?;

    let bound = listener.local_addr().unwrap_or(addr);
    info!(port = bound.port(), "Server listening on port: {}", bound.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
