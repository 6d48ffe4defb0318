//! Value and citation validation logic

use crate::grounding::is_grounded;
use crate::{GroundingPolicy, ValidationConfig};
use scholarlens_domain::{Cardinality, Citation, ClassificationSchema, ClassificationValue, PageCorpus};
use thiserror::Error;
use tracing::{debug, warn};

/// Reasons for rejecting model output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// Value field was blank
    #[error("value is empty")]
    EmptyValue,

    /// Token is not in the dimension's vocabulary
    #[error("'{token}' is not one of: {}", .allowed.join(", "))]
    OutOfVocabulary {
        /// Offending token
        token: String,
        /// Legal tokens, not-reported last
        allowed: Vec<&'static str>,
    },

    /// The not-reported token was combined with other tokens
    #[error("'{not_reported}' must stand alone")]
    NotReportedMixed {
        /// The schema's not-reported token
        not_reported: &'static str,
    },

    /// Numeric value is not a positive integer
    #[error("'{0}' is not a positive integer")]
    InvalidCount(String),

    /// Citation names a page the document does not have
    #[error("citation {index} cites page {page}, document has {pages} pages")]
    PageOutOfRange {
        /// Position in the source list
        index: usize,
        /// Cited page
        page: u32,
        /// Number of pages in the corpus
        pages: usize,
    },

    /// Citation text could not be found in the document
    #[error("citation {index} text not found on {}", .page.map_or("any page".to_string(), |p| format!("page {}", p)))]
    UngroundedCitation {
        /// Position in the source list
        index: usize,
        /// Cited page, if any
        page: Option<u32>,
    },
}

/// Citations that survived review
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationReview {
    /// Accepted citations in model order
    pub accepted: Vec<Citation>,

    /// Positions in `accepted` whose text was not found (grounding policy `Flag`)
    pub ungrounded: Vec<usize>,

    /// Number of placeholder citations dropped
    pub dropped: usize,
}

/// The Gatekeeper validates model output before it is returned
#[derive(Debug, Clone)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Create a Gatekeeper with default configuration
    pub fn default_config() -> Self {
        Self::new(ValidationConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Coerce a raw value string into one of the schema's legal shapes
    ///
    /// Vocabulary tokens match case-insensitively and are returned in the
    /// vocabulary's spelling. Multi-value outputs are split on the schema's
    /// separator with duplicates removed in order. Any not-reported spelling
    /// maps to [`ClassificationValue::NotReported`].
    pub fn validate_value(
        &self,
        schema: &ClassificationSchema,
        raw: &str,
    ) -> Result<ClassificationValue, RejectionReason> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RejectionReason::EmptyValue);
        }
        if schema.is_not_reported(trimmed) {
            return Ok(ClassificationValue::NotReported);
        }

        match schema.cardinality {
            Cardinality::Single => schema
                .canonical_token(trimmed)
                .map(|token| ClassificationValue::Label(token.to_string()))
                .ok_or_else(|| out_of_vocabulary(schema, trimmed)),
            Cardinality::FreeText => Ok(ClassificationValue::Label(collapse_whitespace(trimmed))),
            Cardinality::Numeric => parse_count(trimmed).map(ClassificationValue::Count),
            Cardinality::MultiFromVocabulary { separator }
            | Cardinality::FreeTextMulti { separator } => {
                self.validate_multi(schema, trimmed, separator)
            }
        }
    }

    fn validate_multi(
        &self,
        schema: &ClassificationSchema,
        raw: &str,
        separator: char,
    ) -> Result<ClassificationValue, RejectionReason> {
        let mut labels: Vec<String> = Vec::new();
        let mut saw_not_reported = false;

        for part in raw.split(separator) {
            let part = collapse_whitespace(part);
            if part.is_empty() {
                continue;
            }
            if schema.is_not_reported(&part) {
                saw_not_reported = true;
                continue;
            }

            let label = if schema.cardinality.is_closed_vocabulary() {
                schema
                    .canonical_token(&part)
                    .ok_or_else(|| out_of_vocabulary(schema, &part))?
                    .to_string()
            } else {
                part
            };

            if !labels.iter().any(|l| l.eq_ignore_ascii_case(&label)) {
                labels.push(label);
            }
        }

        if saw_not_reported && !labels.is_empty() {
            return Err(RejectionReason::NotReportedMixed {
                not_reported: schema.not_reported,
            });
        }
        if labels.is_empty() {
            return Ok(ClassificationValue::NotReported);
        }
        Ok(ClassificationValue::Labels(labels))
    }

    /// Drop placeholders, enforce page range and check grounding
    pub fn review_citations(
        &self,
        citations: Vec<Citation>,
        corpus: &PageCorpus,
    ) -> Result<CitationReview, RejectionReason> {
        let mut review = CitationReview::default();

        for (index, citation) in citations.into_iter().enumerate() {
            if citation.is_placeholder() {
                debug!(index, "Dropping placeholder citation");
                review.dropped += 1;
                continue;
            }
            if let Some(page) = citation.page {
                if self.config.enforce_page_range && !corpus.contains_page(page) {
                    return Err(RejectionReason::PageOutOfRange {
                        index,
                        page,
                        pages: corpus.len(),
                    });
                }
            }
            review.accepted.push(citation);
        }

        if self.config.text_grounding == GroundingPolicy::Off {
            return Ok(review);
        }

        for (index, citation) in review.accepted.iter().enumerate() {
            let Some(text) = citation.text.as_deref() else {
                continue;
            };
            if self.citation_is_grounded(text, citation.page, corpus) {
                continue;
            }

            match self.config.text_grounding {
                GroundingPolicy::Reject => {
                    return Err(RejectionReason::UngroundedCitation {
                        index,
                        page: citation.page,
                    });
                }
                _ => {
                    warn!(index, page = ?citation.page, "Citation text not found in document");
                    review.ungrounded.push(index);
                }
            }
        }

        Ok(review)
    }

    fn citation_is_grounded(&self, text: &str, page: Option<u32>, corpus: &PageCorpus) -> bool {
        let min_overlap = self.config.min_grounding_overlap;
        match page.and_then(|p| corpus.page(p)) {
            Some(page) => is_grounded(text, &page.text, min_overlap),
            None => corpus
                .pages()
                .iter()
                .any(|p| is_grounded(text, &p.text, min_overlap)),
        }
    }
}

fn out_of_vocabulary(schema: &ClassificationSchema, token: &str) -> RejectionReason {
    RejectionReason::OutOfVocabulary {
        token: token.to_string(),
        allowed: schema.legal_tokens(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a positive count, allowing thousands separators (`1,245`)
fn parse_count(raw: &str) -> Result<u64, RejectionReason> {
    let digits: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RejectionReason::InvalidCount(raw.to_string()));
    }
    match digits.parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RejectionReason::InvalidCount(raw.to_string())),
    }
}
