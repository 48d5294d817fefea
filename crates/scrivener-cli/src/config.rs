//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use scrivener_agent::AgentConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// CLI configuration, stored at `~/.scrivener/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Ollama connection settings
    #[serde(default)]
    pub ollama: OllamaSettings,

    /// Retrieval settings (chunk size, top-k, fallback bound)
    #[serde(default = "default_agent_config")]
    pub agent: AgentConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Chat history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Ollama connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    /// Ollama API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Generation model for answer synthesis
    #[serde(default = "default_model")]
    pub model: String,

    /// Embedding model
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Vector length the embedding model produces
    #[serde(default = "default_embedding_dimension")]
    pub embedding_dimension: usize,

    /// Embed with Ollama instead of the offline hash embedder
    #[serde(default)]
    pub use_for_embeddings: bool,
}

impl CliConfig {
    /// Get the configuration directory (`~/.scrivener`).
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".scrivener"))
    }

    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from file or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a specific file, or default when absent.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            ollama: OllamaSettings::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            history_size: 1000,
        }
    }
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            embedding_model: default_embedding_model(),
            embedding_dimension: default_embedding_dimension(),
            use_for_embeddings: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_embedding_dimension() -> usize {
    768
}

fn default_agent_config() -> AgentConfig {
    AgentConfig::default()
}
