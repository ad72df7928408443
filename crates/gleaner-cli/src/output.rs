//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use gleaner_domain::{ConsolidatedReport, Diagnostic, Document, FileInsights};
use gleaner_pipeline::KeywordHit;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style, Width},
};

/// Insight column width in table output.
const INSIGHT_COLUMN_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format per-document insights.
    pub fn format_insights(&self, insights: &FileInsights) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = insights
                    .iter()
                    .map(|i| serde_json::json!({ "document": i.name, "insight": i.text }))
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table => {
                if insights.is_empty() {
                    return Ok(self.colorize("No documents analyzed.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Document", "Chars", "Insight"]);
                for insight in insights {
                    let text = if insight.text.is_empty() {
                        "(no insight)".to_string()
                    } else {
                        insight.text.clone()
                    };
                    builder.push_record([
                        insight.name.clone(),
                        insight.text.chars().count().to_string(),
                        text,
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::new(1..)).with(Width::wrap(INSIGHT_COLUMN_WIDTH)))
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(insights
                .iter()
                .map(|i| format!("{}\t{}", i.name, i.text))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format the consolidated report.
    pub fn format_report(&self, report: &ConsolidatedReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let sections: Vec<serde_json::Value> = report
                    .sections
                    .iter()
                    .map(|s| serde_json::json!({ "title": s.title, "body": s.body }))
                    .collect();
                Ok(serde_json::to_string_pretty(&serde_json::json!({
                    "synthesized": report.synthesized,
                    "sections": sections,
                }))?)
            }
            OutputFormat::Table => {
                if report.is_empty() {
                    return Ok(self.colorize("Consolidated report is empty.", "yellow"));
                }
                let mut out = String::new();
                for section in &report.sections {
                    out.push_str(&self.colorize(&section.title, "cyan"));
                    out.push('\n');
                    out.push_str(&section.body);
                    out.push_str("\n\n");
                }
                Ok(out.trim_end().to_string())
            }
            OutputFormat::Quiet => Ok(report.text()),
        }
    }

    /// Format diagnostics.
    pub fn format_diagnostics(&self, diagnostics: &[Diagnostic]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let entries: Vec<serde_json::Value> = diagnostics
                    .iter()
                    .map(|d| {
                        serde_json::json!({
                            "kind": d.kind.as_str(),
                            "scope": d.scope.to_string(),
                            "message": d.message,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&entries)?)
            }
            OutputFormat::Table | OutputFormat::Quiet => Ok(diagnostics
                .iter()
                .map(|d| {
                    if d.kind.is_warning() {
                        self.warning(&d.to_string())
                    } else {
                        self.error(&d.to_string())
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format keyword hits.
    pub fn format_keyword_hits(&self, hits: &[KeywordHit]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hits)?),
            OutputFormat::Table => {
                if hits.is_empty() {
                    return Ok(self.colorize("No keyword matches.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Keyword", "Document", "Matches"]);
                for hit in hits {
                    builder.push_record([
                        hit.keyword.clone(),
                        hit.document.clone(),
                        hit.count.to_string(),
                    ]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(hits
                .iter()
                .map(|h| format!("Found {} instances of '{}' in {}.", h.count, h.keyword, h.document))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format an extraction preview.
    pub fn format_preview(&self, document: &Document, max_chars: usize) -> Result<String> {
        let preview = document.preview(max_chars);
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "document": document.name(),
                "kind": document.kind().as_str(),
                "chars": document.char_len(),
                "preview": preview,
            }))?),
            OutputFormat::Table => Ok(format!(
                "{} ({}, {} chars)\n{}...",
                self.colorize(document.name(), "cyan"),
                document.kind(),
                document.char_len(),
                preview
            )),
            OutputFormat::Quiet => Ok(preview.to_string()),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
