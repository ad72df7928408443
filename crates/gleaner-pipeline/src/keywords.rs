//! Keyword scan over extracted documents
//!
//! Guiding questions double as a comma-separated keyword list. Each keyword
//! is counted case-insensitively in every document without calling the
//! text service.

use gleaner_domain::Document;
use regex::RegexBuilder;
use serde::Serialize;
use tracing::debug;

/// Occurrences of one keyword in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    /// The keyword as entered (trimmed)
    pub keyword: String,
    /// Document name
    pub document: String,
    /// Number of non-overlapping, case-insensitive matches
    pub count: usize,
}

/// Split guiding questions on commas, trimming and dropping blanks
pub fn parse_keywords(guiding_questions: &str) -> Vec<&str> {
    guiding_questions
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .collect()
}

/// Count every keyword in every document
///
/// Keywords are matched literally. Only non-zero counts are reported, in
/// keyword order, then document order.
///
/// # Examples
///
/// ```
/// use gleaner_domain::{Document, SourceKind};
/// use gleaner_pipeline::scan_keywords;
///
/// let docs = vec![Document::new("a.txt", "Pricing came up. PRICING again.", SourceKind::PlainText)];
/// let hits = scan_keywords("pricing, churn", &docs);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].count, 2);
/// ```
pub fn scan_keywords(guiding_questions: &str, documents: &[Document]) -> Vec<KeywordHit> {
    let mut hits = Vec::new();

    for keyword in parse_keywords(guiding_questions) {
        let pattern = match RegexBuilder::new(&regex::escape(keyword))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => pattern,
            Err(error) => {
                debug!(keyword, error = %error, "Skipping keyword");
                continue;
            }
        };

        for document in documents {
            let count = pattern.find_iter(document.text()).count();
            if count > 0 {
                hits.push(KeywordHit {
                    keyword: keyword.to_string(),
                    document: document.name().to_string(),
                    count,
                });
            }
        }
    }

    hits
}
