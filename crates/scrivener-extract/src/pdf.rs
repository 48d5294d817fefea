//! PDF text extraction
//!
//! Uses pdf-extract for the text content. Corrupt or encrypted files
//! surface as a parse error; image-only PDFs come back with no text and
//! are rejected upstream as empty.

use crate::error::ExtractError;
use std::path::Path;
use tracing::debug;

/// Extract the text content of a PDF file
pub fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| ExtractError::Parse(format!("PDF extraction failed: {}", e)))?;

    debug!("Extracted {} chars from {}", text.len(), path.display());

    Ok(text)
}
