//! Report assembly: renders an analysis outcome to a downloadable document
//!
//! Every format carries the same shape: one heading and one paragraph per
//! document, one section for the consolidated report, and a diagnostics
//! section when any unit failed or was truncated.

use crate::error::{CliError, Result};
use docx_rs::{Docx, Paragraph, Run};
use gleaner_domain::Diagnostic;
use gleaner_pipeline::{AnalysisOutcome, KeywordHit};
use serde::Serialize;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// Default report title.
pub const DEFAULT_TITLE: &str = "Transcript Analysis Report";

const CONSOLIDATED_HEADING: &str = "Consolidated Report";
const DIAGNOSTICS_HEADING: &str = "Diagnostics";
const EMPTY_INSIGHT: &str = "No insights were produced for this document.";

/// Output file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// `.md` / `.markdown`
    Markdown,
    /// `.docx`
    Docx,
    /// `.json`
    Json,
}

impl ReportFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("md") | Some("markdown") => Ok(ReportFormat::Markdown),
            Some("docx") => Ok(ReportFormat::Docx),
            Some("json") => Ok(ReportFormat::Json),
            _ => Err(CliError::InvalidInput(format!(
                "Unsupported report extension for {} (use .md, .docx or .json)",
                path.display()
            ))),
        }
    }
}

/// Renders one [`AnalysisOutcome`].
pub struct ReportAssembler<'a> {
    outcome: &'a AnalysisOutcome,
    title: String,
}

impl<'a> ReportAssembler<'a> {
    /// Create an assembler with the default title.
    pub fn new(outcome: &'a AnalysisOutcome) -> Self {
        Self {
            outcome,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Override the report title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render as Markdown.
    pub fn markdown(&self) -> String {
        let mut out = format!("# {}\n\n", self.title);

        for insight in &self.outcome.insights {
            out.push_str(&format!("## {}\n\n{}\n\n", insight.name, insight_text(&insight.text)));
        }

        out.push_str(&format!("## {}\n\n", CONSOLIDATED_HEADING));
        if self.outcome.report.is_empty() {
            out.push_str("No consolidated insights.\n\n");
        }
        for section in &self.outcome.report.sections {
            out.push_str(&format!("### {}\n\n{}\n\n", section.title, section.body));
        }

        if !self.outcome.diagnostics.is_empty() {
            out.push_str(&format!("## {}\n\n", DIAGNOSTICS_HEADING));
            for diagnostic in &self.outcome.diagnostics {
                out.push_str(&format!("- {}\n", diagnostic));
            }
            out.push('\n');
        }

        out.trim_end().to_string() + "\n"
    }

    /// Render as a DOCX package.
    pub fn docx(&self) -> Result<Vec<u8>> {
        let mut docx = Docx::new().add_paragraph(heading(&self.title, 36));

        for insight in &self.outcome.insights {
            docx = docx
                .add_paragraph(heading(&insight.name, 28))
                .add_paragraph(body(insight_text(&insight.text)));
        }

        docx = docx.add_paragraph(heading(CONSOLIDATED_HEADING, 28));
        for section in &self.outcome.report.sections {
            docx = docx
                .add_paragraph(heading(&section.title, 24))
                .add_paragraph(body(&section.body));
        }

        if !self.outcome.diagnostics.is_empty() {
            docx = docx.add_paragraph(heading(DIAGNOSTICS_HEADING, 28));
            for diagnostic in &self.outcome.diagnostics {
                docx = docx.add_paragraph(body(&diagnostic.to_string()));
            }
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| CliError::Report(format!("Failed to pack DOCX: {}", e)))?;
        Ok(buffer.into_inner())
    }

    /// Render as JSON.
    pub fn json(&self) -> Result<String> {
        let report = JsonReport {
            title: &self.title,
            run_id: self.outcome.run_id.to_string(),
            documents: self
                .outcome
                .insights
                .iter()
                .map(|i| JsonDocument {
                    name: &i.name,
                    insight: &i.text,
                })
                .collect(),
            consolidated: JsonConsolidated {
                synthesized: self.outcome.report.synthesized,
                sections: self
                    .outcome
                    .report
                    .sections
                    .iter()
                    .map(|s| JsonSection {
                        title: &s.title,
                        body: &s.body,
                    })
                    .collect(),
            },
            diagnostics: self.outcome.diagnostics.iter().map(JsonDiagnostic::from).collect(),
            keyword_hits: &self.outcome.keyword_hits,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    /// Write the report to `path` in the format its extension names.
    pub fn write(&self, path: &Path) -> Result<ReportFormat> {
        let format = ReportFormat::from_path(path)?;
        match format {
            ReportFormat::Markdown => fs::write(path, self.markdown())?,
            ReportFormat::Docx => fs::write(path, self.docx()?)?,
            ReportFormat::Json => fs::write(path, self.json()?)?,
        }
        info!(path = %path.display(), format = ?format, "Report written");
        Ok(format)
    }
}

fn insight_text(text: &str) -> &str {
    if text.is_empty() {
        EMPTY_INSIGHT
    } else {
        text
    }
}

fn heading(text: &str, size: usize) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(size))
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    run_id: String,
    documents: Vec<JsonDocument<'a>>,
    consolidated: JsonConsolidated<'a>,
    diagnostics: Vec<JsonDiagnostic<'a>>,
    keyword_hits: &'a [KeywordHit],
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    name: &'a str,
    insight: &'a str,
}

#[derive(Serialize)]
struct JsonConsolidated<'a> {
    synthesized: bool,
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    kind: &'static str,
    scope: String,
    message: &'a str,
}

impl<'a> From<&'a Diagnostic> for JsonDiagnostic<'a> {
    fn from(diagnostic: &'a Diagnostic) -> Self {
        Self {
            kind: diagnostic.kind.as_str(),
            scope: diagnostic.scope.to_string(),
            message: &diagnostic.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::traits::TextExtractor;
    use gleaner_domain::{
        ConsolidatedReport, DiagnosticKind, FileInsights, ReportSection, RunId, Scope,
    };

    fn outcome() -> AnalysisOutcome {
        let insights: FileInsights = [("a.txt", "X"), ("b.txt", "")].into_iter().collect();
        AnalysisOutcome {
            run_id: RunId::new(),
            insights,
            report: ConsolidatedReport {
                sections: vec![ReportSection::new("Common themes", "speed")],
                synthesized: true,
            },
            diagnostics: vec![Diagnostic::new(
                Scope::Segment("b.txt".to_string(), 0),
                DiagnosticKind::Service,
                "Rate limit exceeded",
            )],
            keyword_hits: Vec::new(),
        }
    }

    #[test]
    fn test_markdown_shape() {
        let outcome = outcome();
        let markdown = ReportAssembler::new(&outcome).markdown();

        assert!(markdown.starts_with("# Transcript Analysis Report"));
        assert!(markdown.contains("## a.txt\n\nX"));
        assert!(markdown.contains(&format!("## b.txt\n\n{}", EMPTY_INSIGHT)));
        assert!(markdown.contains("## Consolidated Report\n\n### Common themes\n\nspeed"));
        assert!(markdown.contains("- [service] b.txt #0: Rate limit exceeded"));
    }

    #[test]
    fn test_markdown_without_diagnostics_has_no_section() {
        let mut outcome = outcome();
        outcome.diagnostics.clear();
        let markdown = ReportAssembler::new(&outcome).markdown();
        assert!(!markdown.contains(DIAGNOSTICS_HEADING));
    }

    #[test]
    fn test_json_report() {
        let outcome = outcome();
        let json = ReportAssembler::new(&outcome).with_title("Q3 interviews").json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Q3 interviews");
        assert_eq!(value["documents"][0]["name"], "a.txt");
        assert_eq!(value["consolidated"]["sections"][0]["body"], "speed");
        assert_eq!(value["diagnostics"][0]["kind"], "service");
    }

    #[test]
    fn test_docx_is_a_zip_package() {
        let outcome = outcome();
        let bytes = ReportAssembler::new(&outcome).docx().unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_docx_round_trips_through_extraction() {
        let outcome = outcome();
        let bytes = ReportAssembler::new(&outcome).docx().unwrap();
        let text = gleaner_extract::DocumentExtractor
            .extract(&bytes, gleaner_domain::SourceKind::WordProcessor.mime())
            .unwrap();

        assert!(text.contains("a.txt"));
        assert!(text.contains("Common themes"));
        assert!(text.contains("speed"));
    }

    #[test]
    fn test_write_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = outcome();
        let assembler = ReportAssembler::new(&outcome);

        for (file, format) in [
            ("report.md", ReportFormat::Markdown),
            ("report.docx", ReportFormat::Docx),
            ("report.JSON", ReportFormat::Json),
        ] {
            let path = dir.path().join(file);
            assert_eq!(assembler.write(&path).unwrap(), format);
            assert!(path.exists());
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let outcome = outcome();
        let result = ReportAssembler::new(&outcome).write(Path::new("report.pdf"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
