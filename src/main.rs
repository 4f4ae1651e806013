use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "featureboard")]
#[command(version, about = "Feature progress dashboard: status pie chart and burn-down timeline")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to featureboard.toml. Defaults to <project-dir>/featureboard.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Input JSON document. Overrides [source] in featureboard.toml
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    /// Fetch the input document from this URL instead of a file
    #[arg(long, global = true, conflicts_with = "input")]
    pub url: Option<String>,

    /// Randomize feature statuses (demo data only)
    #[arg(long, global = true)]
    pub demo: bool,

    /// Seed for reproducible demo data
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Render as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub now: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the dashboard to a standalone HTML file
    Render {
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,
    },
    /// Print status counts and the ordered feature list
    Summary,
    /// Print one feature's requirements and issues
    Show {
        feature_id: String,
    },
    /// Serve the dashboard over HTTP, re-rendered on every request
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = featureboard::server::DEFAULT_PORT)]
        port: u16,
        /// Open the dashboard in a browser once the server is up
        #[arg(long)]
        open: bool,
        /// Bind all interfaces and allow any origin
        #[arg(long)]
        dev: bool,
    },
    /// Import requirements from a traceability matrix CSV export
    ImportReqs {
        /// Matrix CSV with one section per requirements family
        csv: PathBuf,
        /// Merge into the configured input document instead of starting empty
        #[arg(long)]
        merge: bool,
        /// Write the resulting document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// View, validate or create featureboard.toml
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and the input document
    Validate,
    /// Initialize a default featureboard.toml file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    featureboard::logging::init_tracing(cli.verbose, cli.log_json);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Render { output } => cmd::cmd_render(&cli, &project_dir, output).await?,
        Commands::Summary => cmd::cmd_summary(&cli, &project_dir).await?,
        Commands::Show { feature_id } => cmd::cmd_show(&cli, &project_dir, feature_id).await?,
        Commands::Serve { port, open, dev } => {
            cmd::cmd_serve(&cli, &project_dir, *port, *open, *dev).await?
        }
        Commands::ImportReqs { csv, merge, output } => {
            cmd::cmd_import_reqs(&cli, &project_dir, csv, *merge, output.as_deref()).await?
        }
        Commands::Config { command } => {
            cmd::cmd_config(&cli, &project_dir, command.clone()).await?
        }
    }

    Ok(())
}
