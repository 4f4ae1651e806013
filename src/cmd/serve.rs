//! Dashboard HTTP server command — `featureboard serve`.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use featureboard::server::{self, AppState, ServerConfig};
use featureboard::source::build_source;

use super::super::Cli;

pub async fn cmd_serve(cli: &Cli, project_dir: &Path, port: u16, open: bool, dev: bool) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let source = build_source(&config, cli.now).context("Failed to set up data source")?;
    tracing::info!(source = %source.describe(), "serving features");

    let server_config = ServerConfig {
        port,
        dev_mode: dev,
    };
    let listener = server::bind(&server_config).await?;
    let local_addr = listener.local_addr()?;
    println!("featureboard running at http://{}", local_addr);

    // No browser inside dev containers
    if open && !dev {
        let url = format!("http://localhost:{}", local_addr.port());
        if let Err(e) = open::that(&url) {
            tracing::warn!(%url, error = %e, "failed to open browser");
        }
    }

    let state = AppState {
        source,
        board: config.toml,
        now: cli.now,
    };
    let app = server::build_router(Arc::new(state), dev);
    server::serve(listener, app).await?;

    println!("Server shut down gracefully.");
    Ok(())
}
