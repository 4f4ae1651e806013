//! Data sources for the input document.
//!
//! A [`DataSource`] produces one immutable [`FeatureDocument`] per call. The
//! concrete source is picked from configuration by [`build_source`]:
//!
//! | Source         | Selected when                 |
//! |----------------|-------------------------------|
//! | `FileSource`   | `source.url` is unset         |
//! | `HttpSource`   | `source.url` is set           |
//! | `DemoSource`   | `source.demo = true` (wraps either of the above) |

pub mod demo;
pub mod file;
pub mod http;

pub use demo::DemoSource;
pub use file::FileSource;
pub use http::HttpSource;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::board_config::{BoardConfig, SourceLocation};
use crate::errors::SourceError;
use crate::model::FeatureDocument;

/// Abstraction over where the document comes from.
/// Real implementations: `FileSource`, `HttpSource`. Synthetic: `DemoSource`.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short description for logs and error pages.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<FeatureDocument, SourceError>;
}

/// Build the source selected by `config`. `now` is the render date the demo
/// wrapper dates its features from.
pub fn build_source(
    config: &BoardConfig,
    now: Option<NaiveDate>,
) -> Result<Arc<dyn DataSource>, SourceError> {
    let section = &config.toml.source;
    let base: Arc<dyn DataSource> = match config.source_location() {
        SourceLocation::File(path) => Arc::new(FileSource::new(path)),
        SourceLocation::Url(url) => Arc::new(HttpSource::new(
            url,
            Duration::from_secs(section.timeout_secs),
        )?),
    };

    if section.demo {
        tracing::warn!(source = %base.describe(), "demo mode: feature statuses will be randomized");
        return Ok(Arc::new(DemoSource::new(base, section.demo_seed, now)));
    }
    Ok(base)
}
