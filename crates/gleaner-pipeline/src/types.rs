//! Result types of an analysis run

use crate::keywords::KeywordHit;
use gleaner_domain::{ConsolidatedReport, Diagnostic, DiagnosticKind, FileInsights, RunId};

/// Everything one analysis run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    /// Identifier of the run (time-ordered)
    pub run_id: RunId,

    /// Insight text per document, in upload order
    pub insights: FileInsights,

    /// Cross-document report
    pub report: ConsolidatedReport,

    /// Every per-unit failure and warning, in the order they occurred
    pub diagnostics: Vec<Diagnostic>,

    /// Keyword hits for the guiding questions, if any were supplied
    pub keyword_hits: Vec<KeywordHit>,
}

impl AnalysisOutcome {
    /// Outcome of a run with no documents
    pub fn empty(run_id: RunId) -> Self {
        Self {
            run_id,
            insights: FileInsights::new(),
            report: ConsolidatedReport::empty(),
            diagnostics: Vec::new(),
            keyword_hits: Vec::new(),
        }
    }

    /// Diagnostics that lost content (everything except warnings)
    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.kind.is_warning())
    }

    /// Number of diagnostics of one kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}
