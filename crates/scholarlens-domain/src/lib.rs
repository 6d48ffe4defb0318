//! ScholarLens Domain Layer
//!
//! Core vocabulary shared by every other ScholarLens crate. It defines the
//! page corpus a document is reduced to, the declarative classification
//! schemas, the citation contract, flow results, and the trait boundaries to
//! the outside world (model invocation, page extraction, document storage).
//!
//! ## Key Concepts
//!
//! - **Corpus**: the page-ordered text of one document, tagged with the
//!   [`DocumentId`] of the load that produced it
//! - **Schema**: the declarative definition of one metadata dimension
//! - **Citation**: a `{page, text}` pair grounding an answer in the corpus
//! - **Result**: a validated classification or query answer plus citations
//!
//! ## Architecture
//!
//! - Pure data and contracts only, no I/O
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod citation;
pub mod corpus;
pub mod document;
pub mod result;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use citation::Citation;
pub use corpus::{CorpusError, Page, PageCorpus};
pub use document::{DocumentId, StoredDocument};
pub use result::{
    ClassificationResult, ClassificationValue, FlowMetadata, QueryResult, NOT_FOUND_MESSAGE,
};
pub use schema::{Cardinality, Category, ClassificationSchema};
