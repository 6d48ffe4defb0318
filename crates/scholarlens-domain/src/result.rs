//! Flow results

use crate::citation::Citation;
use crate::document::DocumentId;
use crate::schema::ClassificationSchema;

/// Answer reported when the document does not answer a query
pub const NOT_FOUND_MESSAGE: &str =
    "I could not find an answer to this question in the document.";

/// A validated classification value in one of the schema's legal shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassificationValue {
    /// The document does not report this dimension
    NotReported,

    /// One token (vocabulary member or free-text phrase)
    Label(String),

    /// Several tokens in output order, without duplicates
    Labels(Vec<String>),

    /// A positive count, e.g. a sample size
    Count(u64),
}

impl ClassificationValue {
    /// Whether this is the not-reported outcome
    pub fn is_not_reported(&self) -> bool {
        matches!(self, ClassificationValue::NotReported)
    }

    /// Render in the schema's wire form (NR token, joined list, digits)
    pub fn render(&self, schema: &ClassificationSchema) -> String {
        match self {
            ClassificationValue::NotReported => schema.not_reported.to_string(),
            ClassificationValue::Label(label) => label.clone(),
            ClassificationValue::Labels(labels) => labels.join(schema.joiner()),
            ClassificationValue::Count(n) => n.to_string(),
        }
    }

    /// Individual tokens, NR yielding none
    pub fn tokens(&self) -> Vec<String> {
        match self {
            ClassificationValue::NotReported => Vec::new(),
            ClassificationValue::Label(label) => vec![label.clone()],
            ClassificationValue::Labels(labels) => labels.clone(),
            ClassificationValue::Count(n) => vec![n.to_string()],
        }
    }
}

/// Bookkeeping about one flow invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMetadata {
    /// Document the corpus was built from
    pub document: DocumentId,

    /// Name of the model that answered
    pub model_name: String,

    /// Length of the rendered prompt in chars
    pub prompt_chars: usize,

    /// Wall-clock time of the flow in milliseconds
    pub processing_time_ms: u64,
}

/// Result of classifying one dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Field name of the classified dimension
    pub dimension: &'static str,

    /// Validated value
    pub value: ClassificationValue,

    /// Supporting citations in model order
    pub sources: Vec<Citation>,

    /// Positions in `sources` whose text could not be found in the cited page
    pub ungrounded: Vec<usize>,

    /// Invocation metadata
    pub metadata: FlowMetadata,
}

/// Result of the open-vocabulary query flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    /// Synthesized answer, or [`NOT_FOUND_MESSAGE`]
    pub answer: String,

    /// Whether the document answered the query
    pub answerable: bool,

    /// Supporting citations (always empty when not answerable)
    pub sources: Vec<Citation>,

    /// Positions in `sources` whose text could not be found in the cited page
    pub ungrounded: Vec<usize>,

    /// Invocation metadata
    pub metadata: FlowMetadata,
}

impl QueryResult {
    /// The fixed result for an unanswerable query
    pub fn not_found(metadata: FlowMetadata) -> Self {
        Self {
            answer: NOT_FOUND_MESSAGE.to_string(),
            answerable: false,
            sources: Vec::new(),
            ungrounded: Vec::new(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Cardinality, Category};

    const TECH: &[Category] = &[
        Category { token: "GenAI", definition: "generative" },
        Category { token: "MT", definition: "translation" },
    ];

    fn schema(cardinality: Cardinality) -> ClassificationSchema {
        ClassificationSchema {
            field: "aiTechType",
            title: "AI technology",
            task: "identify the AI technology",
            preamble: None,
            cardinality,
            vocabulary: TECH,
            not_reported: "NR",
            rules: &[],
        }
    }

    #[test]
    fn test_render_not_reported_uses_schema_token() {
        let s = schema(Cardinality::MultiFromVocabulary { separator: ',' });
        assert_eq!(ClassificationValue::NotReported.render(&s), "NR");
    }

    #[test]
    fn test_render_labels_with_joiner() {
        let comma = schema(Cardinality::MultiFromVocabulary { separator: ',' });
        let semi = schema(Cardinality::FreeTextMulti { separator: ';' });
        let value = ClassificationValue::Labels(vec!["GenAI".into(), "MT".into()]);
        assert_eq!(value.render(&comma), "GenAI, MT");
        assert_eq!(value.render(&semi), "GenAI; MT");
    }

    #[test]
    fn test_render_count() {
        let s = schema(Cardinality::Numeric);
        assert_eq!(ClassificationValue::Count(245).render(&s), "245");
    }

    #[test]
    fn test_not_found_result_has_no_sources() {
        let result = QueryResult::not_found(FlowMetadata {
            document: DocumentId::new(),
            model_name: "mock".into(),
            prompt_chars: 0,
            processing_time_ms: 0,
        });
        assert!(!result.answerable);
        assert_eq!(result.answer, NOT_FOUND_MESSAGE);
        assert!(result.sources.is_empty());
    }
}
