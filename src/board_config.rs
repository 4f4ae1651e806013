//! Dashboard configuration read from `featureboard.toml`.
//!
//! Values are layered file → CLI flags. Every section and field is optional;
//! a missing file yields the defaults below.
//!
//! # Configuration File Format
//!
//! ```toml
//! [source]
//! path = "sample-input.json"   # relative to the project directory
//! url = "https://example.org/features.json"   # takes precedence over path
//! timeout_secs = 30
//! demo = false                 # randomize statuses (demo data only)
//! demo_seed = 7
//!
//! [chart]
//! title = "Features Progress"
//! start = "2017-04-01"         # fitted to the data when absent
//! end = "2018-12-31"
//! width = 700
//! height = 750
//! max_ticks = 18
//!
//! [pie]
//! width = 400
//! height = 400
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the project directory.
pub const CONFIG_FILE_NAME: &str = "featureboard.toml";

/// Where the input document comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Local JSON file, used when `url` is unset
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
    /// Remote JSON document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Wrap the source in the demo randomizer
    #[serde(default)]
    pub demo: bool,
    /// Seed for reproducible demo data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_seed: Option<u64>,
}

fn default_source_path() -> PathBuf {
    PathBuf::from("sample-input.json")
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            url: None,
            timeout_secs: default_timeout_secs(),
            demo: false,
            demo_seed: None,
        }
    }
}

/// Burn-down chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSection {
    #[serde(default = "default_title")]
    pub title: String,
    /// First day of the time window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Last day of the time window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default = "default_chart_width")]
    pub width: f64,
    #[serde(default = "default_chart_height")]
    pub height: f64,
    /// Upper bound on month labels along the time axis
    #[serde(default = "default_max_ticks")]
    pub max_ticks: usize,
}

fn default_title() -> String {
    "Features Progress".to_string()
}

fn default_chart_width() -> f64 {
    700.0
}

fn default_chart_height() -> f64 {
    750.0
}

fn default_max_ticks() -> usize {
    18
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            start: None,
            end: None,
            width: default_chart_width(),
            height: default_chart_height(),
            max_ticks: default_max_ticks(),
        }
    }
}

/// Pie chart settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieSection {
    #[serde(default = "default_pie_size")]
    pub width: f64,
    #[serde(default = "default_pie_size")]
    pub height: f64,
}

fn default_pie_size() -> f64 {
    400.0
}

impl Default for PieSection {
    fn default() -> Self {
        Self {
            width: default_pie_size(),
            height: default_pie_size(),
        }
    }
}

/// The complete featureboard.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardToml {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub chart: ChartSection,
    #[serde(default)]
    pub pie: PieSection,
}

impl BoardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse featureboard.toml")
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize featureboard.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Human-readable problems; empty when the configuration is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        match (self.chart.start, self.chart.end) {
            (Some(start), Some(end)) if end <= start => warnings.push(format!(
                "chart.end ({}) must be after chart.start ({})",
                end, start
            )),
            (Some(_), None) => warnings.push(
                "chart.start is set without chart.end; the window will be fitted to the data"
                    .to_string(),
            ),
            (None, Some(_)) => warnings.push(
                "chart.end is set without chart.start; the window will be fitted to the data"
                    .to_string(),
            ),
            _ => {}
        }
        if !(self.chart.width > 0.0 && self.chart.height > 0.0) {
            warnings.push(format!(
                "chart size {}x{} leaves no room to draw",
                self.chart.width, self.chart.height
            ));
        }
        if !(self.pie.width > 0.0 && self.pie.height > 0.0) {
            warnings.push(format!(
                "pie size {}x{} leaves no room to draw",
                self.pie.width, self.pie.height
            ));
        }
        if self.chart.max_ticks == 0 {
            warnings.push("chart.max_ticks is 0; the time axis will have no labels".to_string());
        }
        if let Some(url) = &self.source.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                warnings.push(format!("source.url '{}' is not an http(s) URL", url));
            }
            if self.source.timeout_secs == 0 {
                warnings.push("source.timeout_secs is 0; every fetch will time out".to_string());
            }
        }

        warnings
    }
}

/// CLI flags that override file values.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub url: Option<String>,
    pub demo: bool,
    pub seed: Option<u64>,
}

/// Resolved location of the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    File(PathBuf),
    Url(String),
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::File(path) => write!(f, "{}", path.display()),
            SourceLocation::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Configuration for one invocation: file values plus CLI overrides.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub project_dir: PathBuf,
    pub config_path: PathBuf,
    pub toml: BoardToml,
}

impl BoardConfig {
    /// Load `config_path` (or `<project_dir>/featureboard.toml`).
    pub fn new(project_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self> {
        let config_path = config_path.unwrap_or_else(|| project_dir.join(CONFIG_FILE_NAME));
        let toml = BoardToml::load_or_default(&config_path)?;
        Ok(Self {
            project_dir,
            config_path,
            toml,
        })
    }

    /// Apply CLI overrides. An explicit `--input` replaces a configured URL.
    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(input) = overrides.input {
            self.toml.source.path = input;
            self.toml.source.url = None;
        }
        if let Some(url) = overrides.url {
            self.toml.source.url = Some(url);
        }
        if overrides.demo {
            self.toml.source.demo = true;
        }
        if overrides.seed.is_some() {
            self.toml.source.demo_seed = overrides.seed;
        }
        self
    }

    /// URL when configured, otherwise the path resolved against the
    /// project directory.
    pub fn source_location(&self) -> SourceLocation {
        match &self.toml.source.url {
            Some(url) => SourceLocation::Url(url.clone()),
            None => SourceLocation::File(self.project_dir.join(&self.toml.source.path)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
