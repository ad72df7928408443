//! Structured diagnostics for non-fatal, per-unit failures

use std::fmt;

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// No extractor handles the declared file type; the file was skipped
    UnsupportedType,
    /// The file content was malformed; its text is absent
    Extraction,
    /// A call to the text service failed; the unit contributed nothing
    Service,
    /// A payload exceeded the per-call ceiling and was truncated
    Truncation,
    /// The synthesis call failed; the report fell back to a verbatim join
    Aggregation,
}

impl DiagnosticKind {
    /// True for warnings that did not lose any content
    pub fn is_warning(&self) -> bool {
        matches!(self, DiagnosticKind::Truncation)
    }

    /// Short label
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedType => "unsupported-type",
            DiagnosticKind::Extraction => "extraction",
            DiagnosticKind::Service => "service",
            DiagnosticKind::Truncation => "truncation",
            DiagnosticKind::Aggregation => "aggregation",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which unit of work a diagnostic is about
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The run as a whole (e.g. the aggregation call)
    Run,
    /// One document
    Document(String),
    /// One segment of a document
    Segment(String, usize),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Run => f.write_str("run"),
            Scope::Document(name) => write!(f, "{}", name),
            Scope::Segment(name, index) => write!(f, "{} #{}", name, index),
        }
    }
}

/// A non-fatal failure or warning reported to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Unit the diagnostic is about
    pub scope: Scope,

    /// Category
    pub kind: DiagnosticKind,

    /// Human-readable detail
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic
    pub fn new(scope: Scope, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            scope,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.scope, self.message)
    }
}
