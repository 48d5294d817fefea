//! Configuration for the agent

use serde::{Deserialize, Serialize};

/// Configuration for document loading and retrieval
///
/// The reference values (500-character chunks, top-3 retrieval, 500
/// characters of fallback context) are starting points, not load-bearing
/// constants; all three are plain configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Chunk size in characters
    pub chunk_size: usize,

    /// Number of nearest chunks retrieved per question
    pub top_k: usize,

    /// Maximum characters of context quoted by the fallback answer
    pub fallback_context_chars: usize,
}

impl AgentConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        if self.top_k == 0 {
            return Err("top_k must be greater than 0".to_string());
        }
        if self.fallback_context_chars == 0 {
            return Err("fallback_context_chars must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Fine-grained preset: smaller chunks, wider retrieval
    pub fn fine_grained() -> Self {
        Self {
            chunk_size: 200,
            top_k: 5,
            fallback_context_chars: 500,
        }
    }

    /// Coarse preset: larger chunks, narrower retrieval
    pub fn coarse() -> Self {
        Self {
            chunk_size: 1_000,
            top_k: 2,
            fallback_context_chars: 500,
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AgentConfig {
    /// Default configuration matching the reference values
    fn default() -> Self {
        Self {
            chunk_size: 500,
            top_k: 3,
            fallback_context_chars: 500,
        }
    }
}
