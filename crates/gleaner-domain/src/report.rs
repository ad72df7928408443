//! Consolidated cross-document report

/// One titled section of a consolidated report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// Section heading
    pub title: String,

    /// Section body text
    pub body: String,
}

impl ReportSection {
    /// Create a section
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Cross-document view built once per analysis run
///
/// Either a verbatim join of every file insight or the output of one extra
/// synthesis call. An empty run produces a report with no sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidatedReport {
    /// Report sections in presentation order
    pub sections: Vec<ReportSection>,

    /// True when the sections came from a synthesis call
    pub synthesized: bool,
}

impl ConsolidatedReport {
    /// A report with no sections
    pub fn empty() -> Self {
        Self::default()
    }

    /// A report holding a single section
    pub fn single(title: impl Into<String>, body: impl Into<String>, synthesized: bool) -> Self {
        Self {
            sections: vec![ReportSection::new(title, body)],
            synthesized,
        }
    }

    /// True when the report has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section bodies joined by blank lines
    pub fn text(&self) -> String {
        self.sections
            .iter()
            .map(|section| section.body.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Body of the section with the given title (case-insensitive)
    pub fn section(&self, title: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|section| section.title.eq_ignore_ascii_case(title))
            .map(|section| section.body.as_str())
    }
}
