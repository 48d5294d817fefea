//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Implementations live in other crates: extraction in
//! `scrivener-extract`, embeddings in `scrivener-index` and
//! `scrivener-llm`, answer synthesis in `scrivener-llm`.

use crate::document::FileKind;
use std::path::Path;

/// Trait for turning a file into plain text
///
/// Implemented by the infrastructure layer (scrivener-extract)
pub trait TextExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract the text content of the file at `path`, parsed as `kind`
    fn extract(&self, path: &Path, kind: FileKind) -> Result<String, Self::Error>;
}

/// Trait for mapping text to a fixed-length embedding vector
///
/// Used for both document chunks (once, at index-build time) and questions
/// (once per query). All vectors produced by one embedder share the same
/// length; the index relies on that for consistency.
pub trait TextEmbedder {
    /// Error type for embedding operations
    type Error;

    /// Generate an embedding vector for the given text
    fn embed(&self, text: &str) -> Result<Vec<f32>, Self::Error>;

    /// Length of the vectors this embedder produces
    fn dimension(&self) -> usize;
}

/// Trait for producing a natural-language answer from retrieved context
///
/// The synthesizer is an optional collaborator: the orchestrator holds at
/// most one and falls back to returning raw context when none is
/// configured or a call fails.
pub trait AnswerSynthesizer {
    /// Error type for synthesis operations
    type Error;

    /// Produce an answer to `question` conditioned on `context`
    fn synthesize(&self, question: &str, context: &str) -> Result<String, Self::Error>;
}
