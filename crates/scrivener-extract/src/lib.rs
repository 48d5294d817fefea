//! Scrivener Text Extraction Layer
//!
//! Turns uploaded files into plain text for chunking and retrieval.
//! One module per supported format:
//!
//! - `text`: plain UTF-8 files, read directly
//! - `pdf`: PDF text content via `pdf-extract`
//! - `docx`: Office Open XML documents; only the text runs of
//!   `word/document.xml` are wanted, so the zip container is opened and
//!   the WordprocessingML scanned directly
//!
//! The file kind is resolved once, when the file is selected, into the
//! closed [`FileKind`] variant; extraction dispatches on that variant
//! rather than re-inspecting extension strings.

#![warn(missing_docs)]

pub mod docx;
pub mod error;
pub mod pdf;
pub mod text;

use scrivener_domain::traits::TextExtractor;
use scrivener_domain::FileKind;
use std::path::Path;
use tracing::debug;

pub use error::ExtractError;

/// Extractor dispatching on [`FileKind`]
///
/// # Examples
///
/// ```no_run
/// use scrivener_extract::FileExtractor;
/// use scrivener_domain::traits::TextExtractor;
/// use scrivener_domain::FileKind;
/// use std::path::Path;
///
/// let extractor = FileExtractor::new();
/// let text = extractor.extract(Path::new("notes.txt"), FileKind::PlainText).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileExtractor;

impl FileExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Resolve the file kind from the path's extension, then extract
    ///
    /// Fails with [`ExtractError::UnsupportedType`] when the extension is
    /// not one of the handled formats.
    pub fn extract_auto(&self, path: &Path) -> Result<String, ExtractError> {
        let kind = FileKind::from_path(path)
            .ok_or_else(|| ExtractError::UnsupportedType(path.to_path_buf()))?;
        self.extract(path, kind)
    }
}

impl TextExtractor for FileExtractor {
    type Error = ExtractError;

    fn extract(&self, path: &Path, kind: FileKind) -> Result<String, Self::Error> {
        debug!("Extracting {} as {}", path.display(), kind);

        let text = match kind {
            FileKind::PlainText => text::extract_text(path)?,
            FileKind::Pdf => pdf::extract_pdf(path)?,
            FileKind::Docx => docx::extract_docx(path)?,
        };

        if text.trim().is_empty() {
            return Err(ExtractError::Empty(path.to_path_buf()));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_extract_auto_unsupported_extension() {
        let extractor = FileExtractor::new();
        let result = extractor.extract_auto(Path::new("/tmp/file.xyz"));

        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[test]
    fn test_extract_auto_no_extension() {
        let extractor = FileExtractor::new();
        let result = extractor.extract_auto(Path::new("/tmp/file"));

        assert!(matches!(result, Err(ExtractError::UnsupportedType(_))));
    }

    #[test]
    fn test_extract_plain_text_round_trip() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "line one\nline two").unwrap();

        let extractor = FileExtractor::new();
        let text = extractor.extract_auto(file.path()).unwrap();

        assert_eq!(text, "line one\nline two");
    }

    #[test]
    fn test_extract_missing_file() {
        let extractor = FileExtractor::new();
        let result = extractor.extract(Path::new("/nonexistent/file.txt"), FileKind::PlainText);

        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn test_extract_whitespace_only_is_empty() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "   \n\t  ").unwrap();

        let extractor = FileExtractor::new();
        let result = extractor.extract_auto(file.path());

        assert!(matches!(result, Err(ExtractError::Empty(_))));
    }
}
