//! Gleaner Domain Layer
//!
//! Core data model and trait seams for the transcript insight pipeline.
//! Apart from run identifiers this crate has no external dependencies;
//! infrastructure (HTTP providers, file-format readers) lives in other crates.
//!
//! ## Key Concepts
//!
//! - **Document**: extracted text of one uploaded file, immutable once produced
//! - **Segment**: an ordered, contiguous slice of a document's text
//! - **FileInsights**: per-document insight text, keyed by document name in upload order
//! - **ConsolidatedReport**: the cross-document view built from all file insights
//! - **Diagnostic**: a structured, non-fatal report of a per-unit failure
//!
//! ## Data Flow
//!
//! ```text
//! bytes → TextExtractor → Document → Segments → TextService → FileInsights → ConsolidatedReport
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod credential;
pub mod diagnostic;
pub mod document;
pub mod insight;
pub mod message;
pub mod report;
pub mod run;
pub mod segment;
pub mod traits;

// Re-exports for convenience
pub use credential::Credential;
pub use diagnostic::{Diagnostic, DiagnosticKind, Scope};
pub use document::{Document, SourceKind};
pub use insight::{FileInsight, FileInsights};
pub use message::{ChatMessage, Role};
pub use report::{ConsolidatedReport, ReportSection};
pub use run::RunId;
pub use segment::Segment;
