//! Error types for text extraction

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting text from a file
///
/// Extraction failures abort the current document load and surface as a
/// user-visible warning; they are never retried automatically.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File extension is not one this system handles
    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedType(PathBuf),

    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File was read but its contents could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Extraction succeeded but produced no text
    #[error("No text content in {}", .0.display())]
    Empty(PathBuf),
}
