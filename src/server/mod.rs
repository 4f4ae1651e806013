//! HTTP server that renders a fresh dashboard on every request.

pub mod api;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use api::{AppState, SharedState};

/// Default port for `featureboard serve`.
pub const DEFAULT_PORT: u16 = 3141;

/// Configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Bind all interfaces and allow any origin.
    pub dev_mode: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            dev_mode: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        let host = if self.dev_mode { "0.0.0.0" } else { "127.0.0.1" };
        format!("{}:{}", host, self.port)
    }
}

/// Build the full application router.
pub fn build_router(state: SharedState, dev_mode: bool) -> Router {
    let app = api::api_router().with_state(state);
    if dev_mode {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind the listener. Separate from [`serve`] so callers can learn the
/// bound address (port 0) before blocking.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.bind_addr();
    TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))
}

/// Serve until Ctrl-C.
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let local_addr: SocketAddr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "featureboard serving");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
