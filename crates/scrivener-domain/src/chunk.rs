//! Fixed-size text chunking - the unit of retrieval
//!
//! Chunks are contiguous, non-overlapping, and ordered: concatenating a
//! document's chunks in index order reconstructs the original text exactly.
//! Boundaries are measured in characters, never bytes, so multi-byte text
//! is never split inside a code point.

/// A contiguous substring of a document's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk's text content
    pub text: String,

    /// Character offset of the chunk's first character within the document
    pub start: usize,

    /// Position of this chunk in the document's chunk sequence
    pub index: usize,
}

impl Chunk {
    /// Number of characters in this chunk
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the chunk holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Split `text` into contiguous chunks of `size` characters each
///
/// The final chunk takes the remainder and may be shorter than `size`;
/// every other chunk has exactly `size` characters. Empty input yields an
/// empty sequence. Deterministic: identical input always yields an
/// identical chunk sequence, which retrieval reproducibility relies on.
///
/// # Panics
///
/// Panics if `size` is zero (callers validate configuration first).
///
/// # Examples
///
/// ```
/// use scrivener_domain::chunk;
///
/// let chunks = chunk("abcdef", 4);
/// assert_eq!(chunks.len(), 2);
/// assert_eq!(chunks[0].text, "abcd");
/// assert_eq!(chunks[1].text, "ef");
/// assert_eq!(chunks[1].start, 4);
/// ```
pub fn chunk(text: &str, size: usize) -> Vec<Chunk> {
    assert!(size > 0, "chunk size must be greater than zero");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    let mut start = 0;

    for (offset, ch) in text.chars().enumerate() {
        if current_len == size {
            chunks.push(Chunk {
                text: std::mem::take(&mut current),
                start,
                index: chunks.len(),
            });
            start = offset;
            current_len = 0;
        }
        current.push(ch);
        current_len += 1;
    }

    if !current.is_empty() {
        chunks.push(Chunk {
            text: current,
            start,
            index: chunks.len(),
        });
    }

    chunks
}
