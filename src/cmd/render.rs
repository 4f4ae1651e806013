//! Static dashboard output — `featureboard render`.

use anyhow::{Context, Result};
use std::path::Path;

use featureboard::dashboard::{RenderOptions, render_document};

use super::super::Cli;

pub async fn cmd_render(cli: &Cli, project_dir: &Path, output: &Path) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let (source, document) = super::load_document(cli, &config).await?;

    let options = RenderOptions::from_config(&config.toml, super::today(cli), source.describe());
    let html = render_document(&document, &options).context("Failed to render dashboard")?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, &html)
        .with_context(|| format!("Failed to write dashboard to {}", output.display()))?;

    println!(
        "Wrote dashboard for {} features to {}",
        document.features.len(),
        output.display()
    );
    Ok(())
}
