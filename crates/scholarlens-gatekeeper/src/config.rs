//! Gatekeeper configuration

use crate::GatekeeperError;
use serde::{Deserialize, Serialize};

/// What to do with a citation whose text cannot be found in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroundingPolicy {
    /// Skip the check
    Off,

    /// Keep the citation but record its position as ungrounded
    #[default]
    Flag,

    /// Fail the whole result
    Reject,
}

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject citations naming a page outside the corpus
    pub enforce_page_range: bool,

    /// Policy for citation text that does not appear in the cited page
    pub text_grounding: GroundingPolicy,

    /// Fraction of quoted words that must appear in the page when the quote
    /// is not a verbatim substring (0.0-1.0)
    pub min_grounding_overlap: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_page_range: true,
            text_grounding: GroundingPolicy::Flag,
            min_grounding_overlap: 0.6,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (structural checks only)
    pub fn permissive() -> Self {
        Self {
            enforce_page_range: false,
            text_grounding: GroundingPolicy::Off,
            min_grounding_overlap: 0.0,
        }
    }

    /// Create a strict configuration (ungrounded citations fail the result)
    pub fn strict() -> Self {
        Self {
            enforce_page_range: true,
            text_grounding: GroundingPolicy::Reject,
            min_grounding_overlap: 0.8,
        }
    }

    /// Check that values are within range
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        if !(0.0..=1.0).contains(&self.min_grounding_overlap) {
            return Err(GatekeeperError::Config(format!(
                "min_grounding_overlap must be between 0.0 and 1.0, got {}",
                self.min_grounding_overlap
            )));
        }
        Ok(())
    }
}
