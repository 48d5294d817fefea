//! Scrivener Agent Layer
//!
//! The retrieval-augmented orchestrator: loads a document through the
//! extract -> chunk -> embed -> index pipeline, then answers questions
//! against it by retrieving the nearest chunks and handing them to an
//! answer synthesizer - or, when no synthesizer is available, returning
//! a deterministic raw-context fallback.
//!
//! # Architecture
//!
//! - [`Agent`] owns the collaborators (extractor, embedder, optional
//!   synthesizer) and the validated [`AgentConfig`]
//! - [`LoadedDocument`] carries a document through the load state machine
//! - [`SessionContext`] replaces ambient globals: the active document id
//!   and the per-document conversation logs live here, passed explicitly
//!
//! # Examples
//!
//! ```
//! use scrivener_agent::{Agent, AgentConfig, SessionContext};
//! use scrivener_index::HashEmbedder;
//! use scrivener_llm::MockSynthesizer;
//! use scrivener_extract::FileExtractor;
//!
//! let agent = Agent::new(
//!     FileExtractor::new(),
//!     HashEmbedder::new(64),
//!     Some(MockSynthesizer::new("It is about retrieval.")),
//!     AgentConfig::default(),
//! ).unwrap();
//!
//! let loaded = agent.load_text("notes.txt", "Retrieval finds the nearest chunks.").unwrap();
//! let mut session = SessionContext::new();
//! session.select(loaded.document().id);
//!
//! let answer = agent.answer(&loaded, &mut session, "What is this about?").unwrap();
//! assert_eq!(answer, "It is about retrieval.");
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod session;

pub use config::AgentConfig;
pub use error::AgentError;
pub use loader::LoadedDocument;
pub use orchestrator::{fallback_answer, Agent, FALLBACK_PREFIX, FALLBACK_TRUNCATION_MARKER};
pub use session::SessionContext;
