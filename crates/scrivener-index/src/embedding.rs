//! Embedding utilities for text vectorization
//!
//! This module provides the offline embedder and the distance function the
//! index ranks by. Network-backed embedders live in `scrivener-llm`; this
//! one is deterministic and dependency-free, which makes the whole
//! retrieval pipeline testable without model files or a server.

use scrivener_domain::traits::TextEmbedder;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors that can occur during embedding generation
#[derive(Error, Debug)]
pub enum EmbedError {
    /// Input text was empty
    #[error("Empty text cannot be embedded")]
    EmptyInput,

    /// Embedding backend failed
    #[error("Embedding failed: {0}")]
    Inference(String),
}

/// Deterministic hash-based embedding model
///
/// Generates embeddings by hashing the input text with per-component
/// seeds, then normalizing to unit length. The embeddings are:
///
/// - **Deterministic**: same text always produces the same vector
/// - **Normalized**: all vectors have unit length
/// - **Diverse**: different texts produce different vectors
///
/// Hash-based vectors carry no semantic similarity, but identical text
/// always lands at distance zero, so exact-phrase retrieval and every
/// retrieval-pipeline property stay observable offline.
///
/// # Examples
///
/// ```
/// use scrivener_index::HashEmbedder;
/// use scrivener_domain::traits::TextEmbedder;
///
/// let model = HashEmbedder::new(384);
/// let embedding = model.embed("The sky is blue").unwrap();
/// assert_eq!(embedding.len(), 384);
///
/// // Same text always produces the same embedding
/// assert_eq!(embedding, model.embed("The sky is blue").unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    /// Create a new hash embedder producing vectors of `dimension` length
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    /// Hash text with a seed to get a deterministic f32 value in [-1, 1]
    fn hash_with_seed(text: &str, seed: u64) -> f32 {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        seed.hash(&mut hasher);
        let hash_value = hasher.finish();

        let normalized = (hash_value as f64 / u64::MAX as f64) * 2.0 - 1.0;
        normalized as f32
    }
}

impl TextEmbedder for HashEmbedder {
    type Error = EmbedError;

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.is_empty() {
            return Err(EmbedError::EmptyInput);
        }

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            embedding.push(Self::hash_with_seed(text, i as u64));
        }

        // Normalize to unit length
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for value in &mut embedding {
                *value /= magnitude;
            }
        }

        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Euclidean distance between two embedding vectors
///
/// # Panics
///
/// Panics if the vectors have different lengths; the index checks lengths
/// before ranking.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "Vectors must have same length");

    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}
