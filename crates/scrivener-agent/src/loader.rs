//! Loaded-document handle carrying the load state machine
//!
//! A [`LoadedDocument`] is a document somewhere along
//! `Chunked -> Indexed -> Ready` (or stuck in `Failed`). The agent's load
//! pipeline drives the transitions; questions are only accepted in
//! `Ready`.

use scrivener_domain::{content_hash, Document, LoadState};
use scrivener_index::VectorIndex;

/// A document plus its (eventual) vector index and load state
#[derive(Debug)]
pub struct LoadedDocument {
    pub(crate) document: Document,
    pub(crate) index: Option<VectorIndex>,
    pub(crate) state: LoadState,
}

impl LoadedDocument {
    /// Wrap a freshly chunked document, not yet indexed
    ///
    /// The agent's indexing stage advances it to `Ready`; exposing the
    /// intermediate state keeps the not-ready error path testable.
    pub fn chunked(document: Document) -> Self {
        Self {
            document,
            index: None,
            state: LoadState::Chunked,
        }
    }

    /// The underlying document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The vector index, present once indexing has completed
    pub fn index(&self) -> Option<&VectorIndex> {
        self.index.as_ref()
    }

    /// Current load state
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Whether this handle already covers the given name and text
    ///
    /// Used to key index-build idempotence: re-selecting an unchanged
    /// document is a no-op, anything else rebuilds wholesale.
    pub fn is_unchanged(&self, name: &str, text: &str) -> bool {
        self.document.name == name && self.document.content_hash == content_hash(text)
    }
}
