//! ScholarLens Gatekeeper
//!
//! Checks raw model output against a dimension's schema before it reaches
//! the caller.
//!
//! The Gatekeeper provides:
//! - Value validation (vocabulary membership, cardinality, not-reported rules)
//! - Citation page-range enforcement
//! - Citation text grounding against the cited page
//!
//! # Examples
//!
//! ```
//! use scholarlens_domain::{Cardinality, Category, ClassificationSchema, ClassificationValue};
//! use scholarlens_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! const YES_NO: &[Category] = &[
//!     Category { token: "Yes", definition: "required" },
//!     Category { token: "No", definition: "not required" },
//! ];
//! let schema = ClassificationSchema {
//!     field: "aiDisclosureRequired",
//!     title: "AI disclosure required",
//!     task: "decide whether disclosure is required",
//!     preamble: None,
//!     cardinality: Cardinality::Single,
//!     vocabulary: YES_NO,
//!     not_reported: "NR",
//!     rules: &[],
//! };
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let value = gatekeeper.validate_value(&schema, "yes").unwrap();
//! assert_eq!(value, ClassificationValue::Label("Yes".into()));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
pub mod grounding;
mod validator;

pub use config::{GroundingPolicy, ValidationConfig};
pub use error::GatekeeperError;
pub use validator::{CitationReview, Gatekeeper, RejectionReason};
