//! Terminal summary and feature detail — `featureboard summary`, `featureboard show`.

use anyhow::{Context, Result};
use console::StyledObject;
use std::path::Path;

use featureboard::aggregate::aggregate;
use featureboard::model::Status;
use featureboard::overlay::{IssueLink, requirements_for};

use super::super::Cli;

fn styled_status(status: Status, width: usize) -> StyledObject<String> {
    let text = console::style(format!("{:<width$}", status.label(), width = width));
    match status {
        Status::Completed => text.green(),
        Status::InProgress => text.yellow(),
        Status::NotStarted => text.dim(),
    }
}

/// Issue numbers padded to `width` visible columns; completed ones in green.
fn issue_cell(issues: &[IssueLink], width: usize) -> String {
    let cell = issues
        .iter()
        .map(|issue| {
            let text = format!("#{}", issue.number);
            if issue.completed {
                console::style(text).green().to_string()
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let pad = width.saturating_sub(console::measure_text_width(&cell));
    format!("{}{}", cell, " ".repeat(pad))
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

pub async fn cmd_summary(cli: &Cli, project_dir: &Path) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let (source, document) = super::load_document(cli, &config).await?;
    let aggregation = aggregate(&document.features).context("Failed to aggregate features")?;
    let total = aggregation.total();

    println!();
    println!("{}", console::style(&config.toml.chart.title).bold().cyan());
    println!("─────────────────────────");
    println!("Source: {}", source.describe());
    println!("As of: {}", super::today(cli));
    println!();
    println!("{:<12} {:>6} {:>7}", "Status", "Count", "Share");
    println!("{:<12} {:>6} {:>7}", "------------", "-----", "------");
    for count in &aggregation.status_counts {
        let share = if total > 0 {
            count.count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        println!(
            "{} {:>6} {:>6.1}%",
            styled_status(count.status, 12),
            count.count,
            share
        );
    }
    println!("{:<12} {:>6}", "Total", total);
    println!();

    if aggregation.ordered_features.is_empty() {
        println!("No features to display.");
        println!();
        return Ok(());
    }

    println!(
        "{:<24} {:<12} {:>5} {:<11} {:<11} Description",
        "Feature", "Status", "Done", "Start", "Completed"
    );
    println!(
        "{:<24} {:<12} {:>5} {:<11} {:<11} -----------",
        "------------------------", "------------", "-----", "----------", "----------"
    );
    for feature in &aggregation.ordered_features {
        println!(
            "{:<24} {} {:>4}% {:<11} {:<11} {}",
            feature.id,
            styled_status(feature.status, 12),
            feature.percent_done,
            date_or_dash(feature.start_date()),
            date_or_dash(feature.completed_date()),
            feature.feature.description
        );
    }
    println!();
    Ok(())
}

pub async fn cmd_show(cli: &Cli, project_dir: &Path, feature_id: &str) -> Result<()> {
    let config = super::load_config(cli, project_dir)?;
    let (_source, document) = super::load_document(cli, &config).await?;

    let feature = document.feature(feature_id)?;
    let rows = requirements_for(&document, feature_id)
        .with_context(|| format!("Failed to resolve requirements for '{}'", feature_id))?;

    println!();
    println!(
        "{} {}",
        console::style("Feature").bold(),
        console::style(feature_id).bold().cyan()
    );
    println!("─────────────────────────");
    if !feature.description.is_empty() {
        println!("{}", feature.description);
    }
    println!("Status: {}", feature.status);
    println!(
        "Started: {}   Completed: {}",
        date_or_dash(feature.start_date),
        date_or_dash(feature.completed_date)
    );
    println!();

    if rows.is_empty() {
        println!("No requirements.");
        println!();
        return Ok(());
    }

    println!(
        "{:<16} {:<12} {:<20} Description",
        "ID", "Status", "Issues"
    );
    println!(
        "{:<16} {:<12} {:<20} -----------",
        "----------------", "------------", "--------------------"
    );
    for row in &rows {
        println!(
            "{:<16} {} {} {}",
            row.id,
            styled_status(row.status, 12),
            issue_cell(&row.issues, 20),
            row.description
        );
    }
    println!();
    for row in &rows {
        for issue in &row.issues {
            println!("  #{} {} <{}>", issue.number, issue.title, issue.url);
        }
    }
    println!();
    Ok(())
}
