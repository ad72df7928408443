//! Gleaner Text Extraction
//!
//! Turns uploaded file bytes into plain text. The declared mime type selects
//! the reader; anything unrecognized is an [`ExtractError::UnsupportedType`].
//!
//! | Kind | Mime type | Reader |
//! |------|-----------|--------|
//! | Plain text | `text/plain` | strict UTF-8 decode |
//! | Word processor | `...wordprocessingml.document` | paragraphs in order, joined by spaces |
//! | PDF | `application/pdf` | page text in page order |
//! | Slide deck | `...presentationml.presentation` | shape text in slide order, empty shapes skipped |
//!
//! # Example
//!
//! ```
//! use gleaner_extract::extract_text;
//! use gleaner_domain::SourceKind;
//!
//! let (kind, text) = extract_text(b"Hello. World.", "text/plain").unwrap();
//! assert_eq!(kind, SourceKind::PlainText);
//! assert_eq!(text, "Hello. World.");
//! ```

#![warn(missing_docs)]

mod docx;
mod error;
mod pdf;
mod plain;
mod pptx;

pub use error::ExtractError;

use gleaner_domain::traits::TextExtractor;
use gleaner_domain::{Document, SourceKind};
use std::path::Path;
use tracing::debug;

/// Extract text from `bytes`, choosing the reader by declared `mime`
pub fn extract_text(bytes: &[u8], mime: &str) -> Result<(SourceKind, String), ExtractError> {
    let kind = SourceKind::from_mime(mime)
        .ok_or_else(|| ExtractError::UnsupportedType(mime.to_string()))?;

    let text = match kind {
        SourceKind::PlainText => plain::extract(bytes)?,
        SourceKind::WordProcessor => docx::extract(bytes)?,
        SourceKind::Pdf => pdf::extract(bytes)?,
        SourceKind::SlideDeck => pptx::extract(bytes)?,
    };

    debug!(kind = %kind, bytes = bytes.len(), chars = text.chars().count(), "Extracted text");
    Ok((kind, text))
}

/// Build a [`Document`] named `name` from uploaded bytes
pub fn load_document(
    name: impl Into<String>,
    bytes: &[u8],
    mime: &str,
) -> Result<Document, ExtractError> {
    let (kind, text) = extract_text(bytes, mime)?;
    Ok(Document::new(name, text, kind))
}

/// Read a file from disk and build a [`Document`] named after the file
///
/// The declared mime type is guessed from the file extension.
pub fn load_path(path: &Path) -> Result<Document, ExtractError> {
    let bytes = std::fs::read(path)
        .map_err(|e| ExtractError::Io(format!("{}: {}", path.display(), e)))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    load_document(name, &bytes, &mime_for_path(path))
}

/// Guess the declared mime type of a file from its extension
///
/// Unknown extensions map to `application/octet-stream`, which no reader
/// accepts.
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// [`TextExtractor`] over every supported format
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    type Error = ExtractError;

    fn extract(&self, bytes: &[u8], mime: &str) -> Result<String, Self::Error> {
        extract_text(bytes, mime).map(|(_, text)| text)
    }
}
