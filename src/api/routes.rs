//! HTTP routing and server lifecycle.

use std::sync::Arc;

use axum::{routing::any, Router};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::secrets::SecretSnapshot;

use super::secrets as secrets_api;

/// Shared application state.
pub struct AppState {
    /// Secrets loaded before the listener started; never modified afterwards
    pub secrets: SecretSnapshot,
}

impl AppState {
    pub fn new(secrets: SecretSnapshot) -> Self {
        Self { secrets }
    }
}

/// Build the application router around a loaded snapshot.
pub fn router(secrets: SecretSnapshot) -> Router {
    let state = Arc::new(AppState::new(secrets));

    Router::new()
        // Every method gets the same listing
        .route("/secret", any(secrets_api::get_secrets))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// Runs until SIGINT or SIGTERM, then lets in-flight requests finish.
pub async fn serve(config: &Config, secrets: SecretSnapshot) -> anyhow::Result<()> {
    let count = secrets.len();
    let app = router(secrets);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, secrets = count, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
