//! Error types for classification and query flows

use thiserror::Error;

/// Errors that can occur while running a flow
///
/// Every error is scoped to one invocation: a failed dimension never affects
/// its siblings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The corpus has no pages
    #[error("Document has no pages")]
    EmptyCorpus,

    /// The model call failed
    #[error("Model invocation failed: {0}")]
    ModelInvocationFailed(String),

    /// The model did not answer within the configured timeout
    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    /// Output did not conform to the dimension's contract
    #[error("Invalid output for '{dimension}': {reason}")]
    SchemaViolation {
        /// Dimension field name (or `query`)
        dimension: String,
        /// What was wrong
        reason: String,
    },

    /// No schema is registered under this name
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Query shorter than the configured minimum
    #[error("Query too short: {actual} chars (min: {min})")]
    QueryTooShort {
        /// Minimum length in chars
        min: usize,
        /// Actual trimmed length in chars
        actual: usize,
    },

    /// Rendered corpus exceeds the configured maximum
    #[error("Document too long: {0} chars (max: {1})")]
    CorpusTooLarge(usize, usize),

    /// No document is loaded
    #[error("No document loaded")]
    NoDocument,

    /// The active document changed while the flow was running
    #[error("Document changed while the request was running")]
    StaleDocument,

    /// Page extraction failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Document store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FlowError {
    /// Build a schema violation for `dimension`
    pub fn violation(dimension: impl Into<String>, reason: impl ToString) -> Self {
        FlowError::SchemaViolation {
            dimension: dimension.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether rerunning the same request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowError::ModelInvocationFailed(_)
                | FlowError::Timeout(_)
                | FlowError::SchemaViolation { .. }
                | FlowError::StaleDocument
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FlowError::ModelInvocationFailed("down".into()).is_retryable());
        assert!(FlowError::Timeout(30).is_retryable());
        assert!(FlowError::violation("sampleSize", "missing sources").is_retryable());
        assert!(FlowError::StaleDocument.is_retryable());
        assert!(!FlowError::EmptyCorpus.is_retryable());
        assert!(!FlowError::NoDocument.is_retryable());
        assert!(!FlowError::UnknownDimension("x".into()).is_retryable());
        assert!(!FlowError::QueryTooShort { min: 5, actual: 2 }.is_retryable());
    }

    #[test]
    fn test_violation_display() {
        let err = FlowError::violation("aiTechType", "'Robots' is not one of: GenAI, NR");
        assert_eq!(
            err.to_string(),
            "Invalid output for 'aiTechType': 'Robots' is not one of: GenAI, NR"
        );
    }
}
