//! Segments - the unit of work sent to the text service

/// An ordered, contiguous, non-empty slice of a document's text
///
/// Segments borrow from the document they were cut from, so producing them
/// never copies text. `index` is the position within the parent document and
/// is what results are reassembled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Zero-based position within the parent document
    pub index: usize,

    /// The segment text
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    /// Create a segment
    pub fn new(index: usize, text: &'a str) -> Self {
        Self { index, text }
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
