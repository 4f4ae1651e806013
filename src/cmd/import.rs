//! Requirements matrix import — `featureboard import-reqs`.

use anyhow::{Context, Result, bail};
use std::path::Path;

use featureboard::model::FeatureDocument;
use featureboard::requirements_import::{merge_requirements, read_matrix};

use super::super::Cli;

pub async fn cmd_import_reqs(
    cli: &Cli,
    project_dir: &Path,
    csv: &Path,
    merge: bool,
    output: Option<&Path>,
) -> Result<()> {
    let import = read_matrix(csv).context("Failed to import requirements")?;

    let mut document = if merge {
        let config = super::load_config(cli, project_dir)?;
        if config.toml.source.demo {
            bail!("Refusing to merge requirements into randomized demo data");
        }
        let (_source, document) = super::load_document(cli, &config).await?;
        document
    } else {
        FeatureDocument::default()
    };

    let stats = merge_requirements(&mut document, &import.requirements);
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize document")?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(output, json)
        .with_context(|| format!("Failed to write document to {}", output.display()))?;

    println!(
        "Imported {} requirements ({} added, {} updated) into {}",
        import.requirements.len(),
        stats.added,
        stats.updated,
        output.display()
    );
    if !import.warnings.is_empty() {
        println!("{} row(s) reported problems:", import.warnings.len());
        for warning in &import.warnings {
            println!("  - {}", warning);
        }
    }
    Ok(())
}
