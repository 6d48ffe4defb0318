//! Configuration for the flow engine

use scholarlens_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the flow engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Maximum rendered corpus length (characters)
    pub max_corpus_chars: usize,

    /// Minimum trimmed query length (characters)
    pub min_query_chars: usize,

    /// Optional limit on a single model call (seconds); no limit when unset
    pub timeout_secs: Option<u64>,

    /// Dimensions classified at once by `classify_many`
    pub max_concurrent_flows: usize,

    /// Output validation rules
    pub validation: ValidationConfig,
}

impl FlowConfig {
    /// Get the model-call timeout as a Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_corpus_chars == 0 {
            return Err("max_corpus_chars must be greater than 0".to_string());
        }
        if self.min_query_chars == 0 {
            return Err("min_query_chars must be greater than 0".to_string());
        }
        if self.max_concurrent_flows == 0 {
            return Err("max_concurrent_flows must be greater than 0".to_string());
        }
        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0 when set".to_string());
        }
        self.validation.validate().map_err(|e| e.to_string())
    }
}

impl Default for FlowConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_corpus_chars: 400_000,
            min_query_chars: 5,
            timeout_secs: None,
            max_concurrent_flows: 4,
            validation: ValidationConfig::default(),
        }
    }
}

impl FlowConfig {
    /// Strict preset: bounded calls, ungrounded citations fail the result
    pub fn strict() -> Self {
        Self {
            max_corpus_chars: 200_000,
            min_query_chars: 5,
            timeout_secs: Some(120),
            max_concurrent_flows: 2,
            validation: ValidationConfig::strict(),
        }
    }

    /// Lenient preset: large documents, structural checks only
    pub fn lenient() -> Self {
        Self {
            max_corpus_chars: 1_000_000,
            min_query_chars: 5,
            timeout_secs: None,
            max_concurrent_flows: 8,
            validation: ValidationConfig::permissive(),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
