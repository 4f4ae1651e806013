//! Remote JSON document fetched over HTTP.

use std::time::Duration;

use async_trait::async_trait;

use super::DataSource;
use crate::errors::SourceError;
use crate::model::FeatureDocument;

pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SourceError::Http {
                url: url.clone(),
                source,
            })?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        format!("url {}", self.url)
    }

    async fn load(&self) -> Result<FeatureDocument, SourceError> {
        let http_err = |source| SourceError::Http {
            url: self.url.clone(),
            source,
        };

        let resp = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(http_err)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, status = status.as_u16(), "document fetch failed");
            return Err(SourceError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(http_err)?;
        let document = FeatureDocument::from_json(&text)?;
        tracing::debug!(url = %self.url, features = document.features.len(), "fetched document");
        Ok(document)
    }
}
