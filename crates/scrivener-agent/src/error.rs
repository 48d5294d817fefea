//! Error types for the agent
//!
//! Propagation policy: extraction and index-build failures abort the
//! current document load (the document lands in `Failed`) and leave any
//! previously ready document untouched; synthesis failures never surface
//! here at all - the orchestrator degrades to its fallback instead. No
//! error in this crate terminates the session.

use scrivener_domain::LoadState;
use scrivener_index::IndexError;
use thiserror::Error;

/// Errors that can occur while loading a document or answering a question
#[derive(Error, Debug)]
pub enum AgentError {
    /// Text extraction failed (unreadable, corrupt, or unsupported file)
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Embedding a chunk or question failed
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Index build rejected its input (zero chunks, inconsistent vectors)
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// A question was asked before the document reached `Ready`
    #[error("Document is not ready for questions (state: {0})")]
    NotReady(LoadState),

    /// The index does not match the session's current document
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Invalid agent configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
