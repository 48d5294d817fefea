//! Exact nearest-neighbor index over one document's chunk vectors
//!
//! The index is a read-only snapshot: built in one shot from the full
//! vector set, queried many times, and discarded when the document
//! changes. There is no insert or delete after build.

use crate::embedding::euclidean_distance;
use thiserror::Error;

/// Errors that can occur during index operations
#[derive(Error, Debug)]
pub enum IndexError {
    /// Build was given no vectors (e.g. a document with zero chunks)
    #[error("Cannot build an index from zero vectors")]
    EmptyBuild,

    /// Build was given zero-length vectors
    #[error("Cannot build an index from zero-length vectors")]
    ZeroDimension,

    /// Vector length differs from the index dimension
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        actual: usize,
    },
}

/// One query result: a stored vector's chunk index and its distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the matched vector in the build input, i.e. the chunk
    /// sequence index
    pub index: usize,

    /// Euclidean distance from the query vector
    pub distance: f32,
}

/// Exact Euclidean nearest-neighbor index
///
/// Stores one vector per chunk, indexed by position in the build input.
/// Queries return results by ascending distance with ties broken by lower
/// index, so retrieval order is fully deterministic.
///
/// # Examples
///
/// ```
/// use scrivener_index::VectorIndex;
///
/// let index = VectorIndex::build(vec![
///     vec![0.0, 0.0],
///     vec![1.0, 0.0],
///     vec![0.0, 3.0],
/// ]).unwrap();
///
/// let neighbors = index.query(&[0.1, 0.0], 2).unwrap();
/// assert_eq!(neighbors[0].index, 0);
/// assert_eq!(neighbors[1].index, 1);
/// ```
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build an index over the given vectors
    ///
    /// Vectors are indexed by their position in the input sequence.
    ///
    /// # Errors
    ///
    /// - [`IndexError::EmptyBuild`] if `vectors` is empty
    /// - [`IndexError::ZeroDimension`] if the vectors have no components
    /// - [`IndexError::DimensionMismatch`] if the vectors disagree on length
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self, IndexError> {
        let dimension = match vectors.first() {
            Some(first) => first.len(),
            None => return Err(IndexError::EmptyBuild),
        };

        if dimension == 0 {
            return Err(IndexError::ZeroDimension);
        }

        for vector in &vectors {
            if vector.len() != dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.len(),
                });
            }
        }

        Ok(Self { dimension, vectors })
    }

    /// Return the `k` nearest stored vectors to `vector`
    ///
    /// Results ascend by Euclidean distance; equal distances are ordered
    /// by lower index. Returns `min(k, len)` results - asking for more
    /// neighbors than the index holds is not an error, and `k == 0`
    /// yields an empty result.
    ///
    /// # Errors
    ///
    /// [`IndexError::DimensionMismatch`] if the query vector's length
    /// differs from the index dimension.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>, IndexError> {
        if vector.len() != self.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(index, stored)| Neighbor {
                index,
                distance: euclidean_distance(vector, stored),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }

    /// Number of vectors stored
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no vectors (never true after a successful build)
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector length this index was built with
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}
