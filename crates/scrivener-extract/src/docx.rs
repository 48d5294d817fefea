//! DOCX text extraction
//!
//! A .docx file is a zip container; the document body lives in
//! `word/document.xml` as WordprocessingML. Only the text runs (`<w:t>`
//! elements) matter here, so the XML is scanned directly: text inside
//! `<w:t>` is collected, paragraph ends and explicit breaks become
//! newlines, and everything else is markup to skip.

use crate::error::ExtractError;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Extract the text content of a .docx file
pub fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    let file = fs::File::open(path)?;

    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ExtractError::Parse(format!("Not a DOCX container: {}", e)))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractError::Parse(format!("Missing word/document.xml: {}", e)))?;

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;

    let text = document_xml_to_text(&xml);
    debug!("Extracted {} chars from {}", text.len(), path.display());

    Ok(text)
}

/// Scan WordprocessingML for its plain text content
///
/// Text appears only inside `<w:t>` runs; `</w:p>` ends a paragraph and
/// `<w:br/>` is an explicit line break, both rendered as `\n`; `<w:tab/>`
/// becomes `\t`. All other markup is dropped.
pub fn document_xml_to_text(xml: &str) -> String {
    let mut out = String::new();

    // Each '<'-delimited segment is "tag...>trailing-text". Trailing text
    // is document text only when the tag that opened it was <w:t>.
    for segment in xml.split('<').skip(1) {
        let Some(gt) = segment.find('>') else {
            continue;
        };
        let tag = &segment[..gt];
        let trailing = &segment[gt + 1..];

        if let Some(closing) = tag.strip_prefix('/') {
            if closing == "w:p" {
                out.push('\n');
            }
            continue;
        }

        let name = tag
            .split(|c: char| c.is_whitespace() || c == '/')
            .next()
            .unwrap_or("");

        match name {
            "w:t" if !tag.ends_with('/') => out.push_str(&decode_entities(trailing)),
            "w:br" => out.push('\n'),
            "w:tab" => out.push('\t'),
            _ => {}
        }
    }

    out
}

/// Decode the XML character entities that can appear in a text run
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let Some(semi) = rest.find(';') else {
            out.push_str(rest);
            return out;
        };

        let entity = &rest[1..semi];
        match entity {
            "amp" => out.push('&'),
            "lt" => out.push('<'),
            "gt" => out.push('>'),
            "quot" => out.push('"'),
            "apos" => out.push('\''),
            _ => {
                // Numeric references: &#65; and &#x41;
                let decoded = entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32);

                match decoded {
                    Some(c) => out.push(c),
                    None => out.push_str(&rest[..semi + 1]),
                }
            }
        }
        rest = &rest[semi + 1..];
    }

    out.push_str(rest);
    out
}
