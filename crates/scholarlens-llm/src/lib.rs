//! ScholarLens LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `scholarlens-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic scripted provider for testing
//! - `OllamaProvider`: Local Ollama API integration with JSON-schema output
//!
//! # Examples
//!
//! ```
//! use scholarlens_llm::MockProvider;
//! use scholarlens_domain::traits::LlmProvider;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate_structured("test prompt", "{}").await.unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! # }
//! ```

#![warn(missing_docs)]

pub mod ollama;

use async_trait::async_trait;
use scholarlens_domain::traits::LlmProvider;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be constructed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// A prompt the mock was called with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Full prompt text
    pub prompt: String,

    /// Output schema the prompt was sent with
    pub schema: String,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without any network calls. Scripted
/// responses are keyed by a substring of the prompt; the first matching rule
/// wins, otherwise the default response is returned.
///
/// # Examples
///
/// ```
/// use scholarlens_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("\"sampleSize\"", r#"{"sampleSize": "245", "sources": []}"#);
/// provider.add_error("\"measures\"");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
    model_name: String,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            rules: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
            model_name: "mock".to_string(),
        }
    }

    /// Add a response for prompts containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: impl Into<String>) {
        lock(&self.rules).push((needle.into(), MockReply::Text(response.into())));
    }

    /// Fail every prompt containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>) {
        lock(&self.rules).push((needle.into(), MockReply::Error("Mock error".to_string())));
    }

    /// Sleep before answering, to exercise concurrent callers
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report a different model name in result metadata
    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = name.into();
        self
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Reset the call log
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// The most recent prompt, if any
    pub fn last_prompt(&self) -> Option<String> {
        lock(&self.calls).last().map(|c| c.prompt.clone())
    }

    async fn reply(&self, prompt: &str, schema: &str) -> Result<String, LlmError> {
        lock(&self.calls).push(RecordedCall {
            prompt: prompt.to_string(),
            schema: schema.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let matched = lock(&self.rules)
            .iter()
            .find(|(needle, _)| prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match matched {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error(message)) => Err(LlmError::Other(message)),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error> {
        self.reply(prompt, schema).await
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = "{}";

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate_structured("any prompt", SCHEMA).await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate_structured("say hello please", SCHEMA).await.unwrap(), "world");
        assert_eq!(provider.generate_structured("foo", SCHEMA).await.unwrap(), "bar");
        assert_eq!(
            provider.generate_structured("unknown", SCHEMA).await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_first_matching_rule_wins() {
        let mut provider = MockProvider::default();
        provider.add_response("alpha", "first");
        provider.add_response("alpha beta", "second");
        assert_eq!(provider.generate_structured("alpha beta", SCHEMA).await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");
        assert_eq!(provider.call_count(), 0);

        provider.generate_structured("prompt1", SCHEMA).await.unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate_structured("prompt2", SCHEMA).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate_structured("a bad prompt", SCHEMA).await;
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[tokio::test]
    async fn test_mock_provider_records_structured_schema() {
        let provider = MockProvider::new("structured response");
        let result = provider.generate_structured("prompt", "{\"type\":\"object\"}").await;
        assert_eq!(result.unwrap(), "structured response");

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].schema, "{\"type\":\"object\"}");
        assert_eq!(provider.last_prompt().as_deref(), Some("prompt"));
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate_structured("test", SCHEMA).await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[test]
    fn test_model_name() {
        let provider = MockProvider::default().with_model_name("scripted");
        assert_eq!(provider.model_name(), "scripted");
    }
}
