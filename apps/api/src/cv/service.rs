//! CvService: owns the current `StructuredDocument` and everything that produces it.
//!
//! Initialization is lazy and runs at most once per service, even when several
//! first questions arrive together (`OnceCell`). The document is swapped
//! atomically behind a `RwLock` on re-extraction.
//!
//! Failure policy: cache I/O errors are logged and ignored, and a source that
//! cannot be read leaves the service not ready. `ask` never fails.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OnceCell, RwLock};
use tracing::{error, info, warn};

use crate::cv::answerer::answer;
use crate::cv::extractor::extract;
use crate::cv::source::CvSource;
use crate::cv::store::CvStore;
use crate::errors::AppError;
use crate::models::document::StructuredDocument;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AskResponse {
    pub text: String,
}

/// What `extract_and_cache` did.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractOutcome {
    /// A held or cached document was reused; the extractor did not run.
    CacheHit,
    /// The extractor ran and its result replaced the current document.
    Extracted,
}

pub struct CvService {
    store: CvStore,
    source: Arc<dyn CvSource>,
    current: RwLock<Option<Arc<StructuredDocument>>>,
    init: OnceCell<()>,
    /// Serializes cache checks with extraction so two callers cannot both extract.
    extract_lock: Mutex<()>,
    extractions: AtomicUsize,
}

impl CvService {
    pub fn new(store: CvStore, source: Arc<dyn CvSource>) -> Self {
        Self {
            store,
            source,
            current: RwLock::new(None),
            init: OnceCell::new(),
            extract_lock: Mutex::new(()),
            extractions: AtomicUsize::new(0),
        }
    }

    /// Answers a question about the CV, initializing the service on first use.
    pub async fn ask(&self, question: &str) -> AskResponse {
        self.ensure_initialized().await;
        let doc = self.document().await;
        AskResponse {
            text: answer(doc.as_deref(), question),
        }
    }

    /// Runs initialization once: cached document if present, otherwise the source is
    /// read and extracted. A failed attempt is not retried.
    ///
    /// Only the caller that ran initialization can see `Extracted`; every other
    /// caller gets `CacheHit` while a document is held, and `None` when not ready.
    pub async fn ensure_initialized(&self) -> Option<ExtractOutcome> {
        let mut ran: Option<Option<ExtractOutcome>> = None;
        let slot = &mut ran;
        self.init
            .get_or_init(|| async move {
                *slot = Some(self.initialize().await);
            })
            .await;

        match ran {
            Some(outcome) => outcome,
            None if self.is_ready().await => Some(ExtractOutcome::CacheHit),
            None => None,
        }
    }

    /// Installs a document for `source_text`. Without `force`, an already held or
    /// cached document wins and the extractor is skipped.
    pub async fn extract_and_cache(&self, source_text: &str, force: bool) -> ExtractOutcome {
        let _guard = self.extract_lock.lock().await;

        if !force {
            if self.current.read().await.is_some() {
                return ExtractOutcome::CacheHit;
            }
            if let Some(doc) = self.load_cached().await {
                self.install(doc).await;
                return ExtractOutcome::CacheHit;
            }
        }

        self.extract_and_install(source_text).await;
        ExtractOutcome::Extracted
    }

    /// Forced re-extraction from the configured source, bypassing every cache.
    /// If the source cannot be read the service becomes not ready.
    pub async fn reextract(&self) -> Result<ExtractOutcome, AppError> {
        info!("Force re-extracting CV data from {}", self.source.describe());

        let text = match self.source.read_text().await {
            Ok(text) => text,
            Err(e) => {
                error!("Error re-extracting CV: {e}");
                let _guard = self.extract_lock.lock().await;
                *self.current.write().await = None;
                let _ = self.init.set(());
                return Err(e);
            }
        };

        let outcome = self.extract_and_cache(&text, true).await;
        let _ = self.init.set(());
        Ok(outcome)
    }

    pub async fn document(&self) -> Option<Arc<StructuredDocument>> {
        self.current.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Number of times the extractor has run in this process.
    pub fn extraction_count(&self) -> usize {
        self.extractions.load(Ordering::SeqCst)
    }

    async fn initialize(&self) -> Option<ExtractOutcome> {
        let _guard = self.extract_lock.lock().await;

        if self.current.read().await.is_some() {
            return Some(ExtractOutcome::CacheHit);
        }

        if let Some(doc) = self.load_cached().await {
            self.install(doc).await;
            info!("CV data loaded from existing cache");
            return Some(ExtractOutcome::CacheHit);
        }

        info!("Extracting CV data from {}", self.source.describe());
        match self.source.read_text().await {
            Ok(text) => {
                self.extract_and_install(&text).await;
                Some(ExtractOutcome::Extracted)
            }
            Err(e) => {
                error!("Error loading CV: {e}");
                None
            }
        }
    }

    /// Cache read with errors downgraded to a miss.
    async fn load_cached(&self) -> Option<StructuredDocument> {
        match self.store.load().await {
            Ok(Some(doc)) => Some(doc),
            Ok(None) => {
                info!("No cached CV data at {}", self.store.path().display());
                None
            }
            Err(e) => {
                warn!("Ignoring unreadable CV cache: {e}");
                None
            }
        }
    }

    async fn extract_and_install(&self, text: &str) {
        let doc = extract(text);
        self.extractions.fetch_add(1, Ordering::SeqCst);

        let populated: Vec<String> = doc
            .sections
            .iter()
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(section, _)| section.to_string())
            .collect();
        info!("CV data extracted; populated sections: {populated:?}");

        // The in-memory copy stays authoritative when the cache cannot be written.
        if let Err(e) = self.store.save(&doc).await {
            warn!("Failed to save CV data: {e}");
        }

        self.install(doc).await;
    }

    async fn install(&self, doc: StructuredDocument) {
        *self.current.write().await = Some(Arc::new(doc));
    }
}
