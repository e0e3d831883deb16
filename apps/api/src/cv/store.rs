//! JSON file cache for the extracted CV.
//!
//! Store operations return `Result`; `CvService` decides to log and ignore
//! failures so a broken cache never blocks answering.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::document::StructuredDocument;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cache I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persists a single `StructuredDocument` as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct CvStore {
    path: PathBuf,
}

impl CvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the document, creating parent directories as needed.
    pub async fn save(&self, doc: &StructuredDocument) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc).map_err(|source| self.json_err(source))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_err(source))?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| self.io_err(source))?;

        info!("CV data saved to {}", self.path.display());
        Ok(())
    }

    /// Reads the cached document. `Ok(None)` means no cache file exists.
    pub async fn load(&self) -> Result<Option<StructuredDocument>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_err(source)),
        };

        let doc = serde_json::from_str(&content).map_err(|source| self.json_err(source))?;
        info!("CV data loaded from {}", self.path.display());
        Ok(Some(doc))
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_err(&self, source: serde_json::Error) -> StoreError {
        StoreError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::extractor::extract;
    use crate::cv::taxonomy::Section;

    #[tokio::test]
    async fn test_load_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path().join("missing.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CvStore::new(dir.path().join("nested").join("cv.json"));
        let doc = extract("Skills\nRust\nGo\nProjects\nA compiler\nContact\njane@example.com");

        store.save(&doc).await.unwrap();
        let loaded = store.load().await.unwrap().expect("cache should exist");

        assert_eq!(loaded.sections, doc.sections);
        assert_eq!(loaded.raw_text, doc.raw_text);
        assert_eq!(loaded.extracted_at, doc.extracted_at);
        assert_eq!(loaded.lines(Section::Skills), doc.lines(Section::Skills));
    }

    #[tokio::test]
    async fn test_corrupt_cache_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = CvStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file cannot act as a parent directory.
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.unwrap();
        let store = CvStore::new(blocker.join("cv.json"));

        let err = store.save(&extract("Skills\nRust")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
