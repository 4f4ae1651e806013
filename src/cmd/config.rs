//! Configuration view and validation commands — `featureboard config`.

use anyhow::{Context, Result};
use std::path::Path;

use featureboard::aggregate::aggregate;
use featureboard::board_config::BoardToml;

use super::super::{Cli, ConfigCommands};

pub async fn cmd_config(cli: &Cli, project_dir: &Path, command: Option<ConfigCommands>) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let config_path = &config.config_path;

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("Featureboard Configuration");
            println!("==========================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No featureboard.toml found at {}", config_path.display());
                println!("Using default configuration.");
            }
            println!();

            let rendered = toml::to_string_pretty(&config.toml)
                .context("Failed to serialize configuration")?;
            println!("{}", rendered.trim_end());
            println!();
            println!("Effective values (with CLI overrides):");
            println!("  input = \"{}\"", config.source_location());
            println!("  demo = {}", config.toml.source.demo);
            println!();

            if !config_path.exists() {
                println!("Run 'featureboard config init' to create a featureboard.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            let mut problems = config.validate();
            if problems.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in &problems {
                    println!("  - {}", warning);
                }
            }
            println!();

            println!("Checking input document {}...", config.source_location());
            let (_source, document) = super::load_document(cli, &config).await?;
            let mut document_problems: Vec<String> = document
                .check_references()
                .iter()
                .map(ToString::to_string)
                .collect();
            if let Err(e) = aggregate(&document.features) {
                document_problems.push(e.to_string());
            }

            if document_problems.is_empty() {
                println!(
                    "Input document is valid ({} features, {} requirements, {} issues).",
                    document.features.len(),
                    document.requirements.len(),
                    document.issues.len()
                );
            } else {
                println!("Input document problems:");
                for problem in &document_problems {
                    println!("  - {}", problem);
                }
            }
            println!();

            problems.extend(document_problems);
            if !problems.is_empty() {
                anyhow::bail!("Validation found {} problem(s)", problems.len());
            }
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("featureboard.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent)?;
            }

            BoardToml::default().save(config_path)?;

            println!("Created featureboard.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [source] path or url, timeout_secs, demo");
            println!("  - [chart] title, start/end window, width, height, max_ticks");
            println!("  - [pie] width, height");
            println!();
        }
    }

    Ok(())
}
