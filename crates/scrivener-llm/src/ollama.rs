//! Ollama Provider Implementation
//!
//! Integration with Ollama's local model API for both answer synthesis
//! and text embeddings.
//!
//! # Features
//!
//! - Async HTTP communication with the Ollama API
//! - Configurable endpoint and model
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use scrivener_llm::OllamaSynthesizer;
//!
//! let provider = OllamaSynthesizer::new("http://localhost:11434", "llama3");
//!
//! // The inherent methods are async; the trait impls are blocking
//! // adapters for sync contexts.
//! ```

use crate::LlmError;
use scrivener_domain::traits::{AnswerSynthesizer, TextEmbedder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for model requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Build the generation prompt from a question and its retrieved context
fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "Use the following research notes to answer the question clearly and concisely.\n\
         \n\
         Research Notes:\n\
         {context}\n\
         \n\
         Question:\n\
         {question}\n"
    )
}

/// Request body for the Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from the Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
}

/// Request body for the Ollama embeddings API
#[derive(Serialize)]
struct OllamaEmbeddingsRequest {
    model: String,
    prompt: String,
}

/// Response from the Ollama embeddings API
#[derive(Deserialize)]
struct OllamaEmbeddingsResponse {
    embedding: Vec<f32>,
}

/// Answer synthesizer backed by a local Ollama instance
pub struct OllamaSynthesizer {
    endpoint: String,
    model: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl OllamaSynthesizer {
    /// Create a new Ollama synthesizer
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create a synthesizer against the default local endpoint
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Generate an answer for `question` conditioned on `context`
    ///
    /// # Errors
    ///
    /// Returns an error if Ollama is not running, the model is not
    /// available, communication fails, or the response cannot be parsed.
    pub async fn synthesize(&self, question: &str, context: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: self.model.clone(),
            prompt: build_prompt(question, context),
            stream: false,
        };

        // Retry with exponential backoff: 1s, 2s, 4s, ...
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self.client.post(&url).json(&request_body).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return match response.json::<OllamaGenerateResponse>().await {
                            Ok(ollama_response) => Ok(ollama_response.response),
                            Err(e) => Err(LlmError::InvalidResponse(format!(
                                "Failed to parse response: {}",
                                e
                            ))),
                        };
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl AnswerSynthesizer for OllamaSynthesizer {
    type Error = LlmError;

    fn synthesize(&self, question: &str, context: &str) -> Result<String, Self::Error> {
        // Blocking adapter for sync contexts
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.synthesize(question, context).await })
    }
}

/// Text embedder backed by a local Ollama instance
///
/// The vector length depends on the configured model (e.g. 768 for
/// nomic-embed-text); it is supplied at construction and verified against
/// the server's output on every call, since the index requires one vector
/// length across a whole session.
pub struct OllamaEmbedder {
    endpoint: String,
    model: String,
    dimension: usize,
    client: reqwest::Client,
}

impl OllamaEmbedder {
    /// Create a new Ollama embedder
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint
    /// - `model`: Embedding model (e.g., "nomic-embed-text")
    /// - `dimension`: Vector length the model produces
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            dimension,
            client,
        }
    }

    /// Generate an embedding vector for the given text
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let url = format!("{}/api/embeddings", self.endpoint);

        let request_body = OllamaEmbeddingsRequest {
            model: self.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: OllamaEmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if body.embedding.len() != self.dimension {
            return Err(LlmError::InvalidResponse(format!(
                "Model returned {} components, expected {}",
                body.embedding.len(),
                self.dimension
            )));
        }

        Ok(body.embedding)
    }
}

impl TextEmbedder for OllamaEmbedder {
    type Error = LlmError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error> {
        // Blocking adapter for sync contexts
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async { self.embed(text).await })
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_creation() {
        let provider = OllamaSynthesizer::new("http://localhost:11434", "llama3");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model, "llama3");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_synthesizer_default_endpoint() {
        let provider = OllamaSynthesizer::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.model, "mistral");
    }

    #[test]
    fn test_synthesizer_with_max_retries() {
        let provider =
            OllamaSynthesizer::new("http://localhost:11434", "llama3").with_max_retries(5);
        assert_eq!(provider.max_retries, 5);
    }

    #[test]
    fn test_embedder_creation() {
        let embedder = OllamaEmbedder::new(DEFAULT_ENDPOINT, "nomic-embed-text", 768);
        assert_eq!(embedder.model, "nomic-embed-text");
        assert_eq!(TextEmbedder::dimension(&embedder), 768);
    }

    #[test]
    fn test_prompt_contains_context_and_question() {
        let prompt = build_prompt("What is chunking?", "Chunking splits text.");

        assert!(prompt.contains("Research Notes:\nChunking splits text."));
        assert!(prompt.contains("Question:\nWhat is chunking?"));
    }

    // Integration tests (require a running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_synthesize_integration() {
        let provider = OllamaSynthesizer::default_endpoint("llama3");
        let result = provider
            .synthesize("Say 'hello' and nothing else", "No notes.")
            .await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_synthesize_error_handling() {
        // Unroutable endpoint triggers a communication error
        let provider =
            OllamaSynthesizer::new("http://127.0.0.1:9", "llama3").with_max_retries(1);

        let result = provider.synthesize("test", "context").await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_embed_error_handling() {
        let embedder = OllamaEmbedder::new("http://127.0.0.1:9", "nomic-embed-text", 768);

        let result = embedder.embed("test").await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
