//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled  |
//! |-----------|-------------------|
//! | `render`  | `Render`          |
//! | `summary` | `Summary`, `Show` |
//! | `serve`   | `Serve`           |
//! | `config`  | `Config`          |
//! | `import`  | `ImportReqs`      |

pub mod config;
pub mod import;
pub mod render;
pub mod serve;
pub mod summary;

pub use config::cmd_config;
pub use import::cmd_import_reqs;
pub use render::cmd_render;
pub use serve::cmd_serve;
pub use summary::{cmd_show, cmd_summary};

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use featureboard::board_config::{BoardConfig, CliOverrides};
use featureboard::model::FeatureDocument;
use featureboard::source::{DataSource, build_source};

use super::Cli;

/// Load featureboard.toml and layer the global CLI flags over it.
pub fn load_config(cli: &Cli, project_dir: &Path) -> Result<BoardConfig> {
    let config = BoardConfig::new(project_dir.to_path_buf(), cli.config.clone())?.with_overrides(
        CliOverrides {
            input: cli.input.clone(),
            url: cli.url.clone(),
            demo: cli.demo,
            seed: cli.seed,
        },
    );
    for warning in config.validate() {
        tracing::warn!(%warning, "configuration warning");
    }
    Ok(config)
}

/// The render date: `--now` or today.
pub fn today(cli: &Cli) -> NaiveDate {
    cli.now.unwrap_or_else(|| Local::now().date_naive())
}

/// Build the configured source and load one document snapshot.
pub async fn load_document(
    cli: &Cli,
    config: &BoardConfig,
) -> Result<(Arc<dyn DataSource>, FeatureDocument)> {
    let source = build_source(config, Some(today(cli))).context("Failed to set up data source")?;
    let document = source
        .load()
        .await
        .with_context(|| format!("Failed to load features from {}", source.describe()))?;
    tracing::info!(
        source = %source.describe(),
        features = document.features.len(),
        "loaded features"
    );
    Ok((source, document))
}
