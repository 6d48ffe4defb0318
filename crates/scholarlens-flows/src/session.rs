//! The active document and its persistence
//!
//! A session owns at most one loaded document. Every load gets a fresh
//! [`DocumentId`]; flows snapshot the corpus when they start and their
//! results are discarded if the active document changed in the meantime.

use crate::engine::{DimensionOutcome, FlowEngine};
use crate::error::FlowError;
use scholarlens_domain::traits::{DocumentStore, LlmProvider, PageExtractor};
use scholarlens_domain::{ClassificationResult, DocumentId, PageCorpus, QueryResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{info, warn};

/// A document that is ready for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// Generation id assigned at load time
    pub id: DocumentId,

    /// Display name, usually the file name
    pub name: String,

    /// Page-tagged text
    pub corpus: Arc<PageCorpus>,
}

/// Holds the active document and mirrors it to a [`DocumentStore`]
pub struct DocumentSession<S>
where
    S: DocumentStore,
{
    store: Mutex<S>,
    active: RwLock<Option<Arc<LoadedDocument>>>,
}

impl<S> DocumentSession<S>
where
    S: DocumentStore,
{
    /// Create a session with no active document
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            active: RwLock::new(None),
        }
    }

    /// Extract, persist and activate a document
    ///
    /// The previously stored document is evicted.
    pub fn load<E>(&self, name: &str, bytes: &[u8], extractor: &E) -> Result<Arc<LoadedDocument>, FlowError>
    where
        E: PageExtractor,
    {
        let pages = extractor
            .extract_pages(bytes)
            .map_err(|e| FlowError::Extraction(e.to_string()))?;
        if pages.is_empty() {
            return Err(FlowError::Extraction(format!("'{}' has no pages", name)));
        }

        // Store and active slot change under one guard so they never disagree
        let mut store = self.lock_store();
        let id = DocumentId::new();
        store
            .save(&id.to_string(), name, bytes)
            .map_err(|e| FlowError::Store(e.to_string()))?;

        let document = Arc::new(LoadedDocument {
            id,
            name: name.to_string(),
            corpus: Arc::new(PageCorpus::from_texts(id, pages)),
        });
        self.set_active(Some(Arc::clone(&document)));
        drop(store);

        info!(document = %id, name, pages = document.corpus.len(), "Document loaded");
        Ok(document)
    }

    /// Reactivate the most recently stored document
    ///
    /// If the stored bytes can no longer be extracted the store is cleared
    /// and the extraction error returned.
    pub fn restore<E>(&self, extractor: &E) -> Result<Option<Arc<LoadedDocument>>, FlowError>
    where
        E: PageExtractor,
    {
        let mut store = self.lock_store();
        let stored = store
            .load_most_recent()
            .map_err(|e| FlowError::Store(e.to_string()))?;
        let Some(stored) = stored else {
            return Ok(None);
        };

        let pages = match extractor.extract_pages(&stored.bytes) {
            Ok(pages) if !pages.is_empty() => pages,
            outcome => {
                let reason = match outcome {
                    Err(e) => e.to_string(),
                    Ok(_) => format!("'{}' has no pages", stored.name),
                };
                warn!(name = %stored.name, %reason, "Stored document is unreadable, clearing store");
                if let Err(e) = store.clear_all() {
                    warn!(error = %e, "Failed to clear document store");
                }
                return Err(FlowError::Extraction(reason));
            }
        };

        let id = DocumentId::parse(&stored.id).unwrap_or_else(|_| DocumentId::new());
        let document = Arc::new(LoadedDocument {
            id,
            name: stored.name,
            corpus: Arc::new(PageCorpus::from_texts(id, pages)),
        });
        self.set_active(Some(Arc::clone(&document)));
        drop(store);

        info!(document = %id, name = %document.name, "Document restored");
        Ok(Some(document))
    }

    /// Drop the active document and clear the store
    pub fn clear(&self) -> Result<(), FlowError> {
        let mut store = self.lock_store();
        self.set_active(None);
        store.clear_all().map_err(|e| FlowError::Store(e.to_string()))?;
        drop(store);
        info!("Document cleared");
        Ok(())
    }

    /// The active document, if any
    pub fn current(&self) -> Option<Arc<LoadedDocument>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether `id` is still the active document
    pub fn is_current(&self, id: DocumentId) -> bool {
        self.current().is_some_and(|doc| doc.id == id)
    }

    /// Classify one dimension of the active document
    pub async fn classify<L>(
        &self,
        engine: &FlowEngine<L>,
        dimension: &str,
    ) -> Result<ClassificationResult, FlowError>
    where
        L: LlmProvider,
    {
        let document = self.current().ok_or(FlowError::NoDocument)?;
        let result = engine.classify(dimension, &document.corpus).await;
        self.ensure_current(&document)?;
        result
    }

    /// Classify several dimensions of the active document
    pub async fn classify_many<L>(
        &self,
        engine: &FlowEngine<L>,
        dimensions: &[String],
    ) -> Result<Vec<DimensionOutcome>, FlowError>
    where
        L: LlmProvider,
    {
        let document = self.current().ok_or(FlowError::NoDocument)?;
        let outcomes = engine.classify_many(dimensions, &document.corpus).await;
        self.ensure_current(&document)?;
        Ok(outcomes)
    }

    /// Answer a question about the active document
    pub async fn answer<L>(&self, engine: &FlowEngine<L>, query: &str) -> Result<QueryResult, FlowError>
    where
        L: LlmProvider,
    {
        let document = self.current().ok_or(FlowError::NoDocument)?;
        let result = engine.answer(query, &document.corpus).await;
        self.ensure_current(&document)?;
        result
    }

    fn ensure_current(&self, document: &LoadedDocument) -> Result<(), FlowError> {
        if self.is_current(document.id) {
            Ok(())
        } else {
            warn!(document = %document.id, "Discarding result for a replaced document");
            Err(FlowError::StaleDocument)
        }
    }

    fn set_active(&self, document: Option<Arc<LoadedDocument>>) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = document;
    }

    fn lock_store(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
