//! Scrivener Retrieval Index Layer
//!
//! Embedding utilities and the per-document nearest-neighbor index.
//!
//! # Architecture
//!
//! - In-memory, exact index over one document's chunk vectors
//! - Built once per document load, queried many times, never mutated;
//!   a document change rebuilds the index wholesale
//! - Euclidean distance, ascending, ties broken by lower chunk index
//!
//! A document holds at most a few thousand chunks, so the index is a
//! linear scan over the stored vectors. That keeps the ordering exact and
//! the tie-break deterministic, which retrieval reproducibility requires.

#![warn(missing_docs)]

pub mod embedding;
pub mod vector_index;

pub use embedding::{euclidean_distance, EmbedError, HashEmbedder};
pub use vector_index::{IndexError, Neighbor, VectorIndex};
