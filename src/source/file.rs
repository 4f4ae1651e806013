//! Local JSON file source.

use std::path::PathBuf;

use async_trait::async_trait;

use super::DataSource;
use crate::errors::SourceError;
use crate::model::FeatureDocument;

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DataSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn load(&self) -> Result<FeatureDocument, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Read {
                path: self.path.clone(),
                source,
            })?;
        let document = FeatureDocument::from_json(&text)?;
        tracing::debug!(
            path = %self.path.display(),
            features = document.features.len(),
            "loaded document"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_loads_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("input.json");
        std::fs::write(
            &path,
            r#"{"features": {"f": {"status": "NotStarted", "description": "F"}}}"#,
        )
        .unwrap();

        let doc = FileSource::new(&path).load().await.unwrap();
        assert_eq!(doc.features.len(), 1);
        assert_eq!(doc.features["f"].description, "F");
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");
        match FileSource::new(&path).load().await {
            Err(SourceError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected Read error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"features\": ").unwrap();
        assert!(matches!(
            FileSource::new(&path).load().await,
            Err(SourceError::Parse(_))
        ));
    }
}
