//! Documents produced by text extraction

use std::fmt;

/// Kind of source file a document was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Plain text (decoded as UTF-8)
    PlainText,
    /// Word-processor document (.docx)
    WordProcessor,
    /// Portable Document Format
    Pdf,
    /// Slide deck (.pptx)
    SlideDeck,
}

impl SourceKind {
    /// Map a declared mime type to a source kind
    ///
    /// Parameters after `;` (e.g. `charset=utf-8`) are ignored. Returns `None`
    /// for mime types no extractor handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use gleaner_domain::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_mime("application/pdf"), Some(SourceKind::Pdf));
    /// assert_eq!(SourceKind::from_mime("text/plain; charset=utf-8"), Some(SourceKind::PlainText));
    /// assert_eq!(SourceKind::from_mime("image/png"), None);
    /// ```
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "text/plain" => Some(SourceKind::PlainText),
            "application/pdf" => Some(SourceKind::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(SourceKind::WordProcessor)
            }
            "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(SourceKind::SlideDeck)
            }
            _ => None,
        }
    }

    /// Canonical mime type for this kind
    pub fn mime(&self) -> &'static str {
        match self {
            SourceKind::PlainText => "text/plain",
            SourceKind::WordProcessor => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            SourceKind::Pdf => "application/pdf",
            SourceKind::SlideDeck => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Short human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::PlainText => "text",
            SourceKind::WordProcessor => "docx",
            SourceKind::Pdf => "pdf",
            SourceKind::SlideDeck => "pptx",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted text of one uploaded file
///
/// A document is read-only once constructed; the pipeline only borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
    kind: SourceKind,
}

impl Document {
    /// Create a document from already extracted text
    pub fn new(name: impl Into<String>, text: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            kind,
        }
    }

    /// Display name (usually the uploaded file name); the key in [`crate::FileInsights`]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full extracted text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source kind the text came from
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// First `max_chars` characters of the text, for previews
    pub fn preview(&self, max_chars: usize) -> &str {
        match self.text.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }
}
