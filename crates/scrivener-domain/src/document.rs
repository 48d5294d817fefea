//! Document module - the unit of loading and retrieval

use crate::chunk::{chunk, Chunk};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;

/// Unique identifier for a loaded document based on UUIDv7
///
/// UUIDv7 provides:
/// - Chronological sortability (later loads get larger ids)
/// - 128-bit uniqueness without coordination
/// - RFC 9562-standard format with broad ecosystem support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u128);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    ///
    /// # Examples
    ///
    /// ```
    /// use scrivener_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a DocumentId from a raw u128 value
    ///
    /// Primarily for deserialization and tests.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a DocumentId from a UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use scrivener_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// let parsed = DocumentId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid UUID string: {}", e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// The file formats a document can be loaded from
///
/// The kind is selected exactly once, when the file is picked, and then
/// carried alongside the path; extraction dispatches on it rather than
/// re-inspecting the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// PDF document
    Pdf,
    /// Office Open XML word-processor document (.docx)
    Docx,
    /// Plain UTF-8 text (.txt, .md and friends)
    PlainText,
}

impl FileKind {
    /// Resolve a file kind from an extension string (without the dot)
    ///
    /// Returns `None` for extensions this system does not handle.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "docx" => Some(FileKind::Docx),
            "txt" | "md" | "markdown" | "text" => Some(FileKind::PlainText),
            _ => None,
        }
    }

    /// Resolve a file kind from a path's extension
    ///
    /// # Examples
    ///
    /// ```
    /// use scrivener_domain::FileKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(FileKind::from_path(Path::new("notes.pdf")), Some(FileKind::Pdf));
    /// assert_eq!(FileKind::from_path(Path::new("notes.xyz")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::PlainText => "text",
        };
        write!(f, "{}", s)
    }
}

/// A loaded document: its full extracted text and derived chunk sequence
///
/// Documents are immutable once created. Re-selecting a file with the same
/// name replaces the prior document wholesale; there is no update-in-place.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique identifier, minted at load time
    pub id: DocumentId,

    /// Display name, unique per load (typically the file name)
    pub name: String,

    /// Full extracted text
    pub text: String,

    /// Derived chunk sequence; concatenating the chunks in index order
    /// reconstructs `text` exactly
    pub chunks: Vec<Chunk>,

    /// Hash of `text`, used to key index-build idempotence
    pub content_hash: u64,
}

impl Document {
    /// Create a document from extracted text, chunking it immediately
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero (callers validate configuration first).
    ///
    /// # Examples
    ///
    /// ```
    /// use scrivener_domain::Document;
    ///
    /// let doc = Document::new("notes.txt", "hello world", 5);
    /// assert_eq!(doc.chunks.len(), 3);
    /// ```
    pub fn new(name: impl Into<String>, text: impl Into<String>, chunk_size: usize) -> Self {
        let text = text.into();
        let chunks = chunk(&text, chunk_size);
        let content_hash = content_hash(&text);

        Self {
            id: DocumentId::new(),
            name: name.into(),
            text,
            chunks,
            content_hash,
        }
    }

    /// Number of chunks in this document
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the document carries any text at all
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Compute the content hash used for index-build idempotence
///
/// Deterministic for a given text within and across runs of one binary.
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}
