//! Prompt construction for classification and query flows

use scholarlens_domain::{Cardinality, ClassificationSchema, PageCorpus};

/// Evidence rules shared by every flow
pub const CITATION_DIRECTIVE: &str = r#"Citations:
- List the evidence for your answer in the "sources" field, each entry with a "page" number and a "text" quote.
- Only cite page numbers that appear in the page markers of the content below. Never invent a page number.
- Copy the source text as an exact sentence or phrase from the document, or a very close paraphrase. Never invent text.
- If a statement cannot be tied to a page and a passage, leave it out instead of adding an empty or placeholder entry.
- When the information is not reported, return an empty "sources" list."#;

const PAGE_MARKER_NOTE: &str =
    r#"The document content is provided with page markers (e.g., "Page 1: ...")."#;

const JSON_ONLY_REMINDER: &str =
    "Remember: Return ONLY valid JSON, no markdown code blocks, no explanations.";

/// Builds the prompt for one classification dimension
pub struct ClassificationPromptBuilder<'a> {
    schema: &'a ClassificationSchema,
    corpus: &'a PageCorpus,
}

impl<'a> ClassificationPromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(schema: &'a ClassificationSchema, corpus: &'a PageCorpus) -> Self {
        Self { schema, corpus }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let schema = self.schema;
        let mut prompt = String::new();

        // 1. Task
        prompt.push_str(&format!(
            "You are a research assistant. Your task is to {}.\n",
            schema.task
        ));
        prompt.push_str(PAGE_MARKER_NOTE);
        prompt.push_str("\n\n");

        if let Some(preamble) = schema.preamble {
            prompt.push_str("Definition:\n");
            prompt.push_str(preamble);
            prompt.push_str("\n\n");
        }

        // 2. Vocabulary
        if !schema.vocabulary.is_empty() {
            prompt.push_str(match schema.cardinality {
                Cardinality::Single => "Choose only one category from the following:\n",
                _ => "Choose all that apply from the following categories:\n",
            });
            for category in schema.vocabulary {
                prompt.push_str(&format!("- \"{}\": {}\n", category.token, category.definition));
            }
            prompt.push('\n');
        }

        // 3. Cardinality and not-reported rules
        prompt.push_str("Rules:\n");
        prompt.push_str(&format!("- {}\n", self.shape_rule()));
        for rule in schema.rules {
            prompt.push_str(&format!("- {}\n", rule));
        }
        prompt.push_str(&format!(
            "- If the information is not reported in the document, respond with {}.\n",
            schema.not_reported
        ));
        if schema.cardinality.is_multi_value() {
            prompt.push_str(&format!(
                "- Never combine {} with other values.\n",
                schema.not_reported
            ));
        }
        prompt.push('\n');

        // 4. Evidence rules
        prompt.push_str(CITATION_DIRECTIVE);
        prompt.push_str("\n\n");

        // 5. The document
        prompt.push_str("Paper content:\n---\n");
        prompt.push_str(&self.corpus.render());
        prompt.push_str("\n---\n\n");

        // 6. Output format reminder
        prompt.push_str(&self.output_format());
        prompt
    }

    fn shape_rule(&self) -> String {
        let schema = self.schema;
        match schema.cardinality {
            Cardinality::Single => format!(
                "Respond with only the category name in the \"{}\" field.",
                schema.field
            ),
            Cardinality::MultiFromVocabulary { separator } => format!(
                "Respond with only the category names in the \"{}\" field, separated by '{}' if several apply.",
                schema.field, separator
            ),
            Cardinality::FreeText => format!(
                "Respond with a short phrase in the \"{}\" field.",
                schema.field
            ),
            Cardinality::FreeTextMulti { separator } => format!(
                "Respond in the \"{}\" field, separating several values with '{}'.",
                schema.field, separator
            ),
            Cardinality::Numeric => format!(
                "Respond with digits only in the \"{}\" field.",
                schema.field
            ),
        }
    }

    fn output_format(&self) -> String {
        let schema = self.schema;
        let value_hint = match schema.cardinality {
            Cardinality::Single => format!("one of: {}", schema.legal_tokens().join(", ")),
            Cardinality::MultiFromVocabulary { .. } => format!(
                "one or more of: {}; or {}",
                schema.tokens().collect::<Vec<_>>().join(", "),
                schema.not_reported
            ),
            Cardinality::Numeric => format!("a number, or {}", schema.not_reported),
            Cardinality::FreeText | Cardinality::FreeTextMulti { .. } => {
                format!("your answer, or {}", schema.not_reported)
            }
        };

        format!(
            "Output format (JSON object only, no additional text):\n\
             {{\n  \"{}\": \"<{}>\",\n  \"sources\": [\n    {{ \"page\": 1, \"text\": \"exact sentence from the document\" }}\n  ]\n}}\n\n{}",
            schema.field, value_hint, JSON_ONLY_REMINDER
        )
    }
}

/// Builds the prompt for an open-vocabulary question
pub struct QueryPromptBuilder<'a> {
    query: &'a str,
    corpus: &'a PageCorpus,
}

impl<'a> QueryPromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(query: &'a str, corpus: &'a PageCorpus) -> Self {
        Self { query, corpus }
    }

    /// Build the complete query prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(QUERY_INSTRUCTIONS);
        prompt.push_str("\n");
        prompt.push_str(PAGE_MARKER_NOTE);
        prompt.push_str("\n\n");

        prompt.push_str(CITATION_DIRECTIVE);
        prompt.push_str("\n\n");

        prompt.push_str("Paper content:\n---\n");
        prompt.push_str(&self.corpus.render());
        prompt.push_str("\n---\n\n");

        prompt.push_str(&format!("User query: {}\n\n", self.query));
        prompt.push_str(QUERY_OUTPUT_FORMAT);
        prompt
    }
}

const QUERY_INSTRUCTIONS: &str = r#"You are an expert assistant specializing in extracting information from research papers.
Given the content of a document and a user's query, extract the most relevant information from the document that answers the query.

Rules:
- Answer only from the document. Do not use outside knowledge.
- Do not use the paper's literature review, related work, or background discussion of other studies as evidence; answer about this paper's own study.
- If the query cannot be answered from the document, set "answerable" to false, leave "answer" empty and return an empty "sources" list."#;

const QUERY_OUTPUT_FORMAT: &str = r#"Output format (JSON object only, no additional text):
{
  "answer": "<answer synthesized from the document>",
  "answerable": true,
  "sources": [
    { "page": 1, "text": "exact paragraph or sentence containing the answer" }
  ]
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::{AI_TECH_TYPE, COUNTRY_OR_REGION, PARTICIPANTS_GROUP, SAMPLE_SIZE, SUBJECT_LEVEL};
    use scholarlens_domain::DocumentId;

    fn corpus() -> PageCorpus {
        PageCorpus::from_texts(
            DocumentId::new(),
            vec![
                "Abstract. We study ChatGPT use.".to_string(),
                "Participants were 30 undergraduates.".to_string(),
            ],
        )
    }

    #[test]
    fn test_prompt_includes_task_and_corpus() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&PARTICIPANTS_GROUP, &corpus).build();
        assert!(prompt.contains("Your task is to identify the participants group"));
        assert!(prompt.contains("Page 1: Abstract. We study ChatGPT use."));
        assert!(prompt.contains("Page 2: Participants were 30 undergraduates."));
    }

    #[test]
    fn test_prompt_enumerates_vocabulary() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&PARTICIPANTS_GROUP, &corpus).build();
        assert!(prompt.contains("Choose only one category"));
        for category in PARTICIPANTS_GROUP.vocabulary {
            assert!(prompt.contains(&format!("- \"{}\": {}", category.token, category.definition)));
        }
        assert!(prompt.contains("\"participantsGroup\": \"<one of: Students, Teacher, Mixed, NR>\""));
    }

    #[test]
    fn test_multi_prompt_mentions_separator_and_exclusive_not_reported() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&AI_TECH_TYPE, &corpus).build();
        assert!(prompt.contains("Choose all that apply"));
        assert!(prompt.contains("separated by ','"));
        assert!(prompt.contains("Never combine NR with other values."));
    }

    #[test]
    fn test_prompt_uses_schema_not_reported_token() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&SUBJECT_LEVEL, &corpus).build();
        assert!(prompt.contains("respond with NotApplicable."));
    }

    #[test]
    fn test_free_text_prompt_has_rules_and_preamble() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&COUNTRY_OR_REGION, &corpus).build();
        assert!(prompt.contains("Definition:\nCountry or region refers to"));
        assert!(prompt.contains("separate them with semicolons (;)"));
        assert!(!prompt.contains("Choose only one category"));
    }

    #[test]
    fn test_numeric_prompt() {
        let corpus = corpus();
        let prompt = ClassificationPromptBuilder::new(&SAMPLE_SIZE, &corpus).build();
        assert!(prompt.contains("digits only"));
        assert!(prompt.contains("\"sampleSize\": \"<a number, or NR>\""));
    }

    #[test]
    fn test_every_prompt_carries_citation_directive() {
        let corpus = corpus();
        let classification = ClassificationPromptBuilder::new(&PARTICIPANTS_GROUP, &corpus).build();
        let query = QueryPromptBuilder::new("What tool was used?", &corpus).build();
        assert!(classification.contains(CITATION_DIRECTIVE));
        assert!(query.contains(CITATION_DIRECTIVE));
    }

    #[test]
    fn test_query_prompt() {
        let corpus = corpus();
        let prompt = QueryPromptBuilder::new("What tool was used?", &corpus).build();
        assert!(prompt.contains("User query: What tool was used?"));
        assert!(prompt.contains("literature review"));
        assert!(prompt.contains("\"answerable\""));
        assert!(prompt.contains("Page 2: Participants were 30 undergraduates."));
    }
}
