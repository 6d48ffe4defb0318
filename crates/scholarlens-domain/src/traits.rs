//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the flow core and the
//! collaborators it treats as opaque. Implementations live in other crates.

use crate::document::StoredDocument;
use async_trait::async_trait;

/// Trait for language-model invocation
///
/// Implemented by the infrastructure layer (scholarlens-llm). Each call is an
/// independent request/response; implementations must be shareable across
/// concurrently running flows.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Name of the backing model, for result metadata
    fn model_name(&self) -> &str;

    /// Generate output constrained to `schema` (a JSON Schema document)
    ///
    /// Every flow expects JSON back, so there is no free-form variant.
    async fn generate_structured(&self, prompt: &str, schema: &str)
        -> Result<String, Self::Error>;
}

/// Trait for turning document bytes into per-page text
///
/// Implementations must preserve page order and return an empty string for
/// pages without extractable text.
pub trait PageExtractor {
    /// Error type for extraction
    type Error: std::fmt::Display;

    /// Extract the text of every page in order
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, Self::Error>;
}

/// Trait for the single-document blob store
///
/// Implemented by the infrastructure layer (scholarlens-store). At most one
/// document is held at a time.
pub trait DocumentStore {
    /// Error type for store operations
    type Error: std::fmt::Display;

    /// Persist a document, evicting any previously stored one
    fn save(&mut self, id: &str, name: &str, bytes: &[u8]) -> Result<(), Self::Error>;

    /// The stored document, if any
    fn load_most_recent(&self) -> Result<Option<StoredDocument>, Self::Error>;

    /// Remove every stored document
    fn clear_all(&mut self) -> Result<(), Self::Error>;
}
