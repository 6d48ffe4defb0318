//! Core flow engine: one engine, parameterised by schema

use crate::config::FlowConfig;
use crate::contract::{classification_contract, query_contract};
use crate::error::FlowError;
use crate::parser::{parse_classification, parse_query, QUERY_DIMENSION};
use crate::prompt::{ClassificationPromptBuilder, QueryPromptBuilder};
use crate::registry::SchemaRegistry;
use futures::stream::{self, StreamExt};
use scholarlens_domain::traits::LlmProvider;
use scholarlens_domain::{
    ClassificationResult, ClassificationSchema, FlowMetadata, PageCorpus, QueryResult,
};
use scholarlens_gatekeeper::Gatekeeper;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Outcome of one dimension in a batch
pub type DimensionOutcome = (String, Result<ClassificationResult, FlowError>);

/// Runs classification and query flows against a page corpus
///
/// The engine holds no per-document state; any number of flows may run
/// concurrently against the same corpus.
pub struct FlowEngine<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    registry: SchemaRegistry,
    gatekeeper: Gatekeeper,
    config: FlowConfig,
}

impl<L> Clone for FlowEngine<L>
where
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
            registry: self.registry.clone(),
            gatekeeper: self.gatekeeper.clone(),
            config: self.config.clone(),
        }
    }
}

impl<L> FlowEngine<L>
where
    L: LlmProvider,
{
    /// Create an engine over the built-in dimensions
    pub fn new(llm_provider: L, config: FlowConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            registry: SchemaRegistry::builtin(),
            gatekeeper: Gatekeeper::new(config.validation.clone()),
            config,
        }
    }

    /// Replace the schema registry
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registered dimensions
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// The model provider
    pub fn llm(&self) -> &L {
        &self.llm_provider
    }

    /// Classify one dimension by name
    pub async fn classify(
        &self,
        dimension: &str,
        corpus: &PageCorpus,
    ) -> Result<ClassificationResult, FlowError> {
        let schema = *self.registry.get(dimension)?;
        self.classify_schema(&schema, corpus).await
    }

    /// Classify against an explicit schema
    pub async fn classify_schema(
        &self,
        schema: &ClassificationSchema,
        corpus: &PageCorpus,
    ) -> Result<ClassificationResult, FlowError> {
        let start_time = Instant::now();
        let dimension = schema.field;
        self.check_corpus(corpus)?;

        info!(
            dimension,
            document = %corpus.document(),
            pages = corpus.len(),
            "Starting classification"
        );

        let prompt = ClassificationPromptBuilder::new(schema, corpus).build();
        let contract = classification_contract(schema).to_string();
        let prompt_chars = prompt.chars().count();
        debug!(dimension, prompt_chars, "Prompt built");

        let response = self.invoke(&prompt, &contract).await?;
        debug!(dimension, response_chars = response.len(), "Model responded");

        let raw = parse_classification(&response, schema)?;
        let value = self
            .gatekeeper
            .validate_value(schema, &raw.value)
            .map_err(|reason| FlowError::violation(dimension, reason))?;
        let review = self
            .gatekeeper
            .review_citations(raw.sources, corpus)
            .map_err(|reason| FlowError::violation(dimension, reason))?;

        if review.dropped > 0 {
            warn!(dimension, dropped = review.dropped, "Dropped placeholder citations");
        }
        if value.is_not_reported() && !review.accepted.is_empty() {
            debug!(
                dimension,
                citations = review.accepted.len(),
                "Not-reported value carries citations"
            );
        }

        let metadata = self.metadata(corpus, prompt_chars, start_time);
        info!(
            dimension,
            value = %value.render(schema),
            citations = review.accepted.len(),
            elapsed_ms = metadata.processing_time_ms,
            "Classification complete"
        );

        Ok(ClassificationResult {
            dimension,
            value,
            sources: review.accepted,
            ungrounded: review.ungrounded,
            metadata,
        })
    }

    /// Classify several dimensions concurrently
    ///
    /// Results come back in request order; each dimension succeeds or fails
    /// on its own.
    pub async fn classify_many<I, S>(&self, dimensions: I, corpus: &PageCorpus) -> Vec<DimensionOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = dimensions
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect();
        info!(count = names.len(), document = %corpus.document(), "Classifying dimensions");

        stream::iter(names)
            .map(|name| async move {
                let result = self.classify(&name, corpus).await;
                if let Err(e) = &result {
                    warn!(dimension = %name, error = %e, "Classification failed");
                }
                (name, result)
            })
            .buffered(self.config.max_concurrent_flows.max(1))
            .collect()
            .await
    }

    /// Classify every registered dimension
    pub async fn classify_all(&self, corpus: &PageCorpus) -> Vec<DimensionOutcome> {
        let names: Vec<&'static str> = self.registry.iter().map(|s| s.field).collect();
        self.classify_many(names, corpus).await
    }

    /// Answer a free-form question about the document
    pub async fn answer(&self, query: &str, corpus: &PageCorpus) -> Result<QueryResult, FlowError> {
        let start_time = Instant::now();
        let query = query.trim();
        let actual = query.chars().count();
        if actual < self.config.min_query_chars {
            return Err(FlowError::QueryTooShort {
                min: self.config.min_query_chars,
                actual,
            });
        }
        self.check_corpus(corpus)?;

        info!(document = %corpus.document(), query_chars = actual, "Answering query");

        let prompt = QueryPromptBuilder::new(query, corpus).build();
        let prompt_chars = prompt.chars().count();
        let response = self.invoke(&prompt, &query_contract().to_string()).await?;
        debug!(response_chars = response.len(), "Model responded");

        let raw = parse_query(&response)?;
        if !raw.answerable {
            info!("Query not answerable from document");
            return Ok(QueryResult::not_found(self.metadata(corpus, prompt_chars, start_time)));
        }

        let answer = raw.answer.trim().to_string();
        if answer.is_empty() {
            return Err(FlowError::violation(
                QUERY_DIMENSION,
                "answerable response has an empty answer",
            ));
        }

        let review = self
            .gatekeeper
            .review_citations(raw.sources, corpus)
            .map_err(|reason| FlowError::violation(QUERY_DIMENSION, reason))?;

        let metadata = self.metadata(corpus, prompt_chars, start_time);
        info!(
            citations = review.accepted.len(),
            elapsed_ms = metadata.processing_time_ms,
            "Query answered"
        );

        Ok(QueryResult {
            answer,
            answerable: true,
            sources: review.accepted,
            ungrounded: review.ungrounded,
            metadata,
        })
    }

    fn check_corpus(&self, corpus: &PageCorpus) -> Result<(), FlowError> {
        if corpus.is_empty() {
            return Err(FlowError::EmptyCorpus);
        }
        let chars = corpus.rendered_len();
        if chars > self.config.max_corpus_chars {
            return Err(FlowError::CorpusTooLarge(chars, self.config.max_corpus_chars));
        }
        Ok(())
    }

    /// Call the model exactly once, honouring the optional timeout
    async fn invoke(&self, prompt: &str, contract: &str) -> Result<String, FlowError> {
        let call = self.llm_provider.generate_structured(prompt, contract);
        let result = match self.config.timeout() {
            Some(limit) => timeout(limit, call)
                .await
                .map_err(|_| FlowError::Timeout(limit.as_secs()))?,
            None => call.await,
        };
        result.map_err(|e| FlowError::ModelInvocationFailed(e.to_string()))
    }

    fn metadata(&self, corpus: &PageCorpus, prompt_chars: usize, start_time: Instant) -> FlowMetadata {
        FlowMetadata {
            document: corpus.document(),
            model_name: self.llm_provider.model_name().to_string(),
            prompt_chars,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }
    }
}
