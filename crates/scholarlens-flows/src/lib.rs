//! ScholarLens Flows
//!
//! Classifies a research paper along fixed metadata dimensions and answers
//! free-form questions about it, with every answer anchored to page-level
//! citations.
//!
//! # Architecture
//!
//! ```text
//! PageCorpus → FlowEngine(schema) → LLM → Parser → Gatekeeper → Result
//! ```
//!
//! Dimensions are data ([`ClassificationSchema`] rows in [`dimensions`]); a
//! single [`FlowEngine`] runs all of them. The same vocabulary list feeds the
//! prompt, the JSON-schema output contract and the validator.
//!
//! # Example Usage
//!
//! ```
//! use scholarlens_domain::{ClassificationValue, DocumentId, PageCorpus};
//! use scholarlens_flows::{FlowConfig, FlowEngine};
//! use scholarlens_llm::MockProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"{"participantsGroup": "Students", "sources": [{"page": 2, "text": "30 undergraduate students"}]}"#,
//! );
//! let engine = FlowEngine::new(llm, FlowConfig::default());
//!
//! let corpus = PageCorpus::from_texts(
//!     DocumentId::new(),
//!     vec!["Abstract".to_string(), "We recruited 30 undergraduate students.".to_string()],
//! );
//! let result = engine.classify("participantsGroup", &corpus).await?;
//!
//! assert_eq!(result.value, ClassificationValue::Label("Students".into()));
//! assert_eq!(result.sources[0].page, Some(2));
//! # Ok(())
//! # }
//! ```
//!
//! [`ClassificationSchema`]: scholarlens_domain::ClassificationSchema

#![warn(missing_docs)]

mod config;
pub mod contract;
pub mod dimensions;
mod engine;
mod error;
pub mod parser;
pub mod prompt;
mod registry;
mod session;

#[cfg(test)]
mod tests;

pub use config::FlowConfig;
pub use engine::{DimensionOutcome, FlowEngine};
pub use error::FlowError;
pub use registry::SchemaRegistry;
pub use session::{DocumentSession, LoadedDocument};
