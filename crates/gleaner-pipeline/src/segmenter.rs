//! Sentence-boundary segmentation of extracted text
//!
//! Text is split on the literal delimiter `". "` and fragments are packed
//! greedily until a segment reaches the soft `target_size`. Segments borrow
//! from the input, so joining them with `". "` rebuilds it exactly.

use gleaner_domain::Segment;

/// Sentence delimiter segments are cut on
pub const SENTENCE_DELIMITER: &str = ". ";

/// Splits text into ordered, bounded-size segments
///
/// `target_size` is the soft threshold that closes a segment; `hard_limit`
/// is the per-call ceiling of the text service. The segmenter never cuts
/// inside a sentence: segments longer than `hard_limit` are left for the
/// client to truncate.
///
/// # Examples
///
/// ```
/// use gleaner_pipeline::Segmenter;
///
/// let segmenter = Segmenter::new(10, 100);
/// let texts: Vec<_> = segmenter
///     .segments("First sentence. Second one. Third")
///     .map(|s| s.text)
///     .collect();
/// assert_eq!(texts, vec!["First sentence", "Second one", "Third"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    target_size: usize,
    hard_limit: usize,
}

impl Segmenter {
    /// Create a segmenter; a zero target is treated as 1
    pub fn new(target_size: usize, hard_limit: usize) -> Self {
        Self {
            target_size: target_size.max(1),
            hard_limit,
        }
    }

    /// Soft segment threshold in characters
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Per-call ceiling in characters
    pub fn hard_limit(&self) -> usize {
        self.hard_limit
    }

    /// True when the segment will be truncated by the client
    pub fn is_oversize(&self, segment: &Segment<'_>) -> bool {
        segment.char_len() > self.hard_limit
    }

    /// Lazily segment `text`
    ///
    /// The iterator is `Clone`, so the sequence can be restarted or
    /// walked twice without re-splitting.
    pub fn segments<'a>(&self, text: &'a str) -> Segments<'a> {
        Segments {
            text,
            target_size: self.target_size,
            pos: 0,
            index: 0,
            done: text.is_empty(),
        }
    }
}

/// Iterator over the segments of one text
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    target_size: usize,
    pos: usize,
    index: usize,
    done: bool,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let start = self.pos;
        let mut chars = 0;
        let end = loop {
            match self.text[self.pos..].find(SENTENCE_DELIMITER) {
                Some(offset) => {
                    let fragment_end = self.pos + offset;
                    chars += self.text[self.pos..fragment_end].chars().count();
                    self.pos = fragment_end + SENTENCE_DELIMITER.len();

                    if chars >= self.target_size {
                        // A trailing empty fragment would make an empty segment
                        if self.pos == self.text.len() {
                            self.done = true;
                            break self.text.len();
                        }
                        break fragment_end;
                    }
                    chars += SENTENCE_DELIMITER.len();
                }
                None => {
                    self.done = true;
                    break self.text.len();
                }
            }
        };

        let segment = Segment::new(self.index, &self.text[start..end]);
        self.index += 1;
        Some(segment)
    }
}

impl std::iter::FusedIterator for Segments<'_> {}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn joining_segments_rebuilds_input(text in "[a-c .]{0,200}", target in 1usize..40) {
            let segmenter = Segmenter::new(target, 4000);
            let joined = segmenter
                .segments(&text)
                .map(|s| s.text)
                .collect::<Vec<_>>()
                .join(SENTENCE_DELIMITER);
            prop_assert_eq!(joined, text);
        }

        #[test]
        fn segments_are_non_empty_and_reach_target(text in "[a-c .]{0,200}", target in 1usize..40) {
            let segmenter = Segmenter::new(target, 4000);
            let segments: Vec<_> = segmenter.segments(&text).collect();

            for (i, segment) in segments.iter().enumerate() {
                prop_assert!(!segment.text.is_empty());
                prop_assert_eq!(segment.index, i);
                if i + 1 < segments.len() {
                    prop_assert!(segment.char_len() >= target);
                }
            }
        }
    }
}
