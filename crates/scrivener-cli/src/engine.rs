//! Wiring the agent together from CLI configuration.

use crate::config::CliConfig;
use crate::error::{CliError, Result};
use scrivener_agent::Agent;
use scrivener_domain::traits::TextEmbedder;
use scrivener_extract::FileExtractor;
use scrivener_index::HashEmbedder;
use scrivener_llm::{OllamaEmbedder, OllamaSynthesizer};

/// Default vector length for the offline hash embedder
const HASH_DIMENSION: usize = 384;

/// The concrete agent type the CLI drives.
pub type CliAgent = Agent<FileExtractor, CliEmbedder, OllamaSynthesizer>;

/// Embedder selected by configuration: offline hashing or Ollama.
pub enum CliEmbedder {
    /// Deterministic offline embedder
    Hash(HashEmbedder),
    /// Ollama embeddings API
    Ollama(OllamaEmbedder),
}

impl TextEmbedder for CliEmbedder {
    type Error = anyhow::Error;

    fn embed(&self, text: &str) -> std::result::Result<Vec<f32>, Self::Error> {
        match self {
            CliEmbedder::Hash(embedder) => embedder.embed(text).map_err(anyhow::Error::from),
            CliEmbedder::Ollama(embedder) => {
                TextEmbedder::embed(embedder, text).map_err(anyhow::Error::from)
            }
        }
    }

    fn dimension(&self) -> usize {
        match self {
            CliEmbedder::Hash(embedder) => embedder.dimension(),
            CliEmbedder::Ollama(embedder) => TextEmbedder::dimension(embedder),
        }
    }
}

/// Build the agent from configuration.
///
/// With `offline` set, no synthesizer is attached and embeddings use the
/// hash embedder regardless of configuration, so answers come from
/// retrieved context alone and no network is touched.
pub fn build_agent(config: &CliConfig, offline: bool) -> Result<CliAgent> {
    let embedder = if !offline && config.ollama.use_for_embeddings {
        CliEmbedder::Ollama(OllamaEmbedder::new(
            &config.ollama.endpoint,
            &config.ollama.embedding_model,
            config.ollama.embedding_dimension,
        ))
    } else {
        CliEmbedder::Hash(HashEmbedder::new(HASH_DIMENSION))
    };

    let synthesizer = if offline {
        None
    } else {
        Some(OllamaSynthesizer::new(
            &config.ollama.endpoint,
            &config.ollama.model,
        ))
    };

    Agent::new(
        FileExtractor::new(),
        embedder,
        synthesizer,
        config.agent.clone(),
    )
    .map_err(CliError::Agent)
}
