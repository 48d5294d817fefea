//! Document load lifecycle
//!
//! The load pipeline moves one-directionally through
//! `Unloaded -> Extracting -> Chunked -> Indexed -> Ready`, with `Failed`
//! as a terminal state reachable from the extraction and index-build
//! stages. Selecting a new document resets to `Unloaded` and restarts the
//! whole sequence; chunks and indexes are never partially reused.

use std::fmt;

/// Lifecycle state of a document load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadState {
    /// No document selected
    Unloaded,
    /// Text extraction in progress
    Extracting,
    /// Text extracted and chunked; no index yet
    Chunked,
    /// Chunk embeddings computed and index built, not yet verified
    Indexed,
    /// Fully loaded; questions may be asked
    Ready,
    /// A load stage failed; terminal until a new load starts
    Failed,
}

impl LoadState {
    /// Whether `answer()` may be invoked in this state
    pub fn can_answer(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    /// Whether this state permits a direct transition to `next`
    ///
    /// Transitions are one-directional; the only way back is restarting
    /// from `Unloaded` with a fresh load.
    pub fn can_transition_to(&self, next: LoadState) -> bool {
        use LoadState::*;
        matches!(
            (self, next),
            (Unloaded, Extracting)
                | (Extracting, Chunked)
                | (Chunked, Indexed)
                | (Indexed, Ready)
                | (Extracting, Failed)
                | (Chunked, Failed)
                | (Indexed, Failed)
                // Any state may be abandoned for a fresh load
                | (_, Unloaded)
        )
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoadState::Unloaded => "unloaded",
            LoadState::Extracting => "extracting",
            LoadState::Chunked => "chunked",
            LoadState::Indexed => "indexed",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}
