//! CV sources: where the raw résumé text comes from.
//!
//! `CvService` holds an `Arc<dyn CvSource>`, picked at startup from the
//! configured path: `.pdf` files go through `pdf-extract`, anything else is
//! read as UTF-8 text.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;

#[async_trait]
pub trait CvSource: Send + Sync {
    /// Reads the full CV text. Not cancellable, no timeout.
    async fn read_text(&self) -> Result<String, AppError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// A PDF on disk. Text extraction is CPU-bound and runs on the blocking pool.
pub struct PdfFileSource {
    path: PathBuf,
}

impl PdfFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CvSource for PdfFileSource {
    async fn read_text(&self) -> Result<String, AppError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;

        let path = self.path.display().to_string();
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in PDF extraction: {e}"))
            })?
            .map_err(|e| AppError::SourceUnavailable(format!("{path}: {e}")))?;

        info!("Extracted {} characters of text from {path}", text.len());
        Ok(text)
    }

    fn describe(&self) -> String {
        format!("pdf:{}", self.path.display())
    }
}

/// A plain-text CV on disk.
pub struct TextFileSource {
    path: PathBuf,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CvSource for TextFileSource {
    async fn read_text(&self) -> Result<String, AppError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::SourceUnavailable(format!("{}: {e}", self.path.display())))
    }

    fn describe(&self) -> String {
        format!("text:{}", self.path.display())
    }
}

/// Text already held in memory.
#[cfg(test)]
pub struct StaticSource(pub String);

#[cfg(test)]
#[async_trait]
impl CvSource for StaticSource {
    async fn read_text(&self) -> Result<String, AppError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline text".to_string()
    }
}

/// Picks the source implementation from the file extension.
pub fn source_for_path(path: &Path) -> Arc<dyn CvSource> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Arc::new(PdfFileSource::new(path))
    } else {
        Arc::new(TextFileSource::new(path))
    }
}
