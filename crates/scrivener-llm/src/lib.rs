//! Scrivener LLM Provider Layer
//!
//! Pluggable answer-synthesizer and embedder implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `AnswerSynthesizer` and
//! `TextEmbedder` traits from `scrivener-domain`. A synthesizer is an
//! optional collaborator: when none is configured, or a call fails, the
//! orchestrator degrades to its deterministic fallback instead of
//! surfacing an error.
//!
//! # Providers
//!
//! - `MockSynthesizer`: deterministic mock for testing
//! - `OllamaSynthesizer` / `OllamaEmbedder`: local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use scrivener_llm::MockSynthesizer;
//! use scrivener_domain::traits::AnswerSynthesizer;
//!
//! let provider = MockSynthesizer::new("Hello from the model!");
//! let answer = provider.synthesize("any question", "any context").unwrap();
//! assert_eq!(answer, "Hello from the model!");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use scrivener_domain::traits::AnswerSynthesizer;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use ollama::{OllamaEmbedder, OllamaSynthesizer};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the model server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Model not available on the server
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Mock answer synthesizer for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use scrivener_llm::MockSynthesizer;
/// use scrivener_domain::traits::AnswerSynthesizer;
///
/// let mut provider = MockSynthesizer::default();
/// provider.add_response("who?", "nobody");
/// assert_eq!(provider.synthesize("who?", "ctx").unwrap(), "nobody");
/// assert_eq!(provider.synthesize("other", "ctx").unwrap(), "Default mock answer");
/// ```
#[derive(Debug, Clone)]
pub struct MockSynthesizer {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    always_fail: Arc<Mutex<bool>>,
}

impl MockSynthesizer {
    /// Create a MockSynthesizer with a fixed answer for all questions
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            always_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a MockSynthesizer that fails on every call
    pub fn failing() -> Self {
        let provider = Self::new("");
        *provider.always_fail.lock().unwrap() = true;
        provider
    }

    /// Add a specific answer for a given question
    pub fn add_response(&mut self, question: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(question.into(), response.into());
    }

    /// Configure an error for a specific question
    pub fn add_error(&mut self, question: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(question.into(), "ERROR".to_string());
    }

    /// Get the number of times synthesize was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockSynthesizer {
    fn default() -> Self {
        Self::new("Default mock answer")
    }
}

impl AnswerSynthesizer for MockSynthesizer {
    type Error = LlmError;

    fn synthesize(&self, question: &str, _context: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        if *self.always_fail.lock().unwrap() {
            return Err(LlmError::Other("Mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(question) {
            if response == "ERROR" {
                return Err(LlmError::Other("Mock error".to_string()));
            }
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_default() {
        let provider = MockSynthesizer::new("Test answer");
        let result = provider.synthesize("any question", "any context");
        assert_eq!(result.unwrap(), "Test answer");
    }

    #[test]
    fn test_mock_specific_responses() {
        let mut provider = MockSynthesizer::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.synthesize("hello", "c").unwrap(), "world");
        assert_eq!(provider.synthesize("foo", "c").unwrap(), "bar");
        assert_eq!(provider.synthesize("unknown", "c").unwrap(), "Default mock answer");
    }

    #[test]
    fn test_mock_call_count() {
        let provider = MockSynthesizer::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.synthesize("q1", "c").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.synthesize("q2", "c").unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_error() {
        let mut provider = MockSynthesizer::default();
        provider.add_error("bad question");

        let result = provider.synthesize("bad question", "c");
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_mock_failing_fails_every_call() {
        let provider = MockSynthesizer::failing();

        assert!(provider.synthesize("a", "c").is_err());
        assert!(provider.synthesize("b", "c").is_err());
        assert_eq!(provider.call_count(), 2);
    }

    #[test]
    fn test_mock_clone_shares_call_count() {
        let provider1 = MockSynthesizer::new("test");
        let provider2 = provider1.clone();

        provider1.synthesize("q", "c").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
