//! Command implementations.

pub mod ask;
pub mod classify;
pub mod clear;
pub mod dimensions;
pub mod load;

pub use self::ask::execute_ask;
pub use self::classify::execute_classify;
pub use self::clear::execute_clear;
pub use self::dimensions::execute_dimensions;
pub use self::load::execute_load;

use crate::error::Result;
use crate::extract::AutoExtractor;
use scholarlens_domain::traits::{DocumentStore, LlmProvider};
use scholarlens_flows::{DocumentSession, FlowEngine, FlowError, LoadedDocument};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs: the engine, the active document and the extractor.
pub struct Context<L, S>
where
    L: LlmProvider,
    S: DocumentStore,
{
    /// Flow engine
    pub engine: FlowEngine<L>,

    /// Active document, mirrored to the store
    pub session: DocumentSession<S>,

    /// Page extractor for files read from disk
    pub extractor: AutoExtractor,
}

impl<L, S> Context<L, S>
where
    L: LlmProvider,
    S: DocumentStore,
{
    /// Create a context with no active document.
    pub fn new(engine: FlowEngine<L>, store: S) -> Self {
        Self {
            engine,
            session: DocumentSession::new(store),
            extractor: AutoExtractor::new(),
        }
    }

    /// Replace the page extractor.
    pub fn with_extractor(mut self, extractor: AutoExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Read `path` and make it the active document.
    pub fn load_file(&self, path: &str) -> Result<Arc<LoadedDocument>> {
        let bytes = fs::read(path)?;
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string());
        Ok(self.session.load(&name, &bytes, &self.extractor)?)
    }

    /// The document a flow should run on.
    ///
    /// Loads `file` when given; otherwise uses the active document, restoring
    /// it from the store if this process has not loaded one yet.
    pub fn document(&self, file: Option<&str>) -> Result<Arc<LoadedDocument>> {
        if let Some(path) = file {
            return self.load_file(path);
        }
        if let Some(document) = self.session.current() {
            return Ok(document);
        }
        match self.session.restore(&self.extractor)? {
            Some(document) => Ok(document),
            None => Err(FlowError::NoDocument.into()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Context;
    use scholarlens_flows::{FlowConfig, FlowEngine};
    use scholarlens_llm::MockProvider;
    use scholarlens_store::MemoryDocumentStore;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub fn context(llm: MockProvider) -> Context<MockProvider, MemoryDocumentStore> {
        Context::new(FlowEngine::new(llm, FlowConfig::default()), MemoryDocumentStore::new())
    }

    /// Three-page paper as a form-feed separated text file.
    pub fn paper(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("paper.txt");
        std::fs::write(
            &path,
            "Chatbots in EFL writing\u{000C}We recruited 245 undergraduate students in Japan.\u{000C}Writing anxiety decreased significantly.",
        )
        .unwrap();
        path
    }
}
