//! Plain text extraction

use crate::error::ExtractError;
use std::fs;
use std::path::Path;

/// Read a plain UTF-8 text file
pub fn extract_text(path: &Path) -> Result<String, ExtractError> {
    Ok(fs::read_to_string(path)?)
}
