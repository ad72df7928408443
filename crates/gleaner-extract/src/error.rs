//! Error types for text extraction

use thiserror::Error;

/// Errors that can occur while extracting text from a file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No reader handles the declared mime type; the file is skipped
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// The content could not be parsed as the declared type
    #[error("Malformed content: {0}")]
    Malformed(String),

    /// The file could not be read
    #[error("I/O error: {0}")]
    Io(String),
}

impl ExtractError {
    /// True when the file was skipped because of its type
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ExtractError::UnsupportedType(_))
    }
}
