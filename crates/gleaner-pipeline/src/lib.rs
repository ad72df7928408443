//! Gleaner Pipeline
//!
//! Turns extracted document text into insights through a size-constrained
//! text service, then folds the per-document insights into one report.
//!
//! # Architecture
//!
//! ```text
//! Document → Segmenter → SegmentProcessor → InsightClient → TextService
//!                              ↓
//!                        FileInsights → Aggregator → ConsolidatedReport
//! ```
//!
//! # Failure model
//!
//! Only a missing credential, invalid configuration or cancellation stops
//! a run. A failed segment contributes nothing to its document's insight, a
//! failed synthesis falls back to the verbatim report, and both are reported
//! as [`gleaner_domain::Diagnostic`]s on the [`AnalysisOutcome`].
//!
//! # Example Usage
//!
//! ```
//! use gleaner_domain::{Credential, Document, SourceKind};
//! use gleaner_llm::MockProvider;
//! use gleaner_pipeline::{run_analysis, AggregationMode, AnalysisConfig};
//!
//! let docs = vec![
//!     Document::new("a.txt", "First call notes", SourceKind::PlainText),
//!     Document::new("b.txt", "Second call notes", SourceKind::PlainText),
//! ];
//!
//! let outcome = run_analysis(
//!     MockProvider::echo(),
//!     AnalysisConfig::default(),
//!     &docs,
//!     &Credential::new("key"),
//!     None,
//!     AggregationMode::Verbatim,
//! )
//! .unwrap();
//!
//! assert_eq!(outcome.insights.len(), 2);
//! assert_eq!(outcome.report.sections.len(), 1);
//! ```

#![warn(missing_docs)]

mod aggregator;
mod cache;
mod cancel;
pub mod client;
mod config;
mod error;
mod keywords;
mod pipeline;
mod processor;
pub mod prompt;
pub mod sections;
mod segmenter;
mod types;

#[cfg(test)]
mod tests;

pub use aggregator::{verbatim_corpus, Aggregation, Aggregator, VERBATIM_TITLE};
pub use cache::{CacheKey, InsightCache};
pub use cancel::CancelToken;
pub use client::{InsightClient, Reply, Truncation};
pub use config::{AggregationMode, AnalysisConfig, SynthesisKind, MAX_CONCURRENCY};
pub use error::PipelineError;
pub use keywords::{parse_keywords, scan_keywords, KeywordHit};
pub use pipeline::Pipeline;
pub use processor::{DocumentInsight, SegmentProcessor};
pub use segmenter::{Segmenter, Segments, SENTENCE_DELIMITER};
pub use types::AnalysisOutcome;

use gleaner_domain::traits::TextService;
use gleaner_domain::{Credential, Document};
use gleaner_llm::ServiceError;

/// Run one analysis with a fresh pipeline and no cancellation
pub fn run_analysis<S>(
    service: S,
    config: AnalysisConfig,
    documents: &[Document],
    credential: &Credential,
    guiding_questions: Option<&str>,
    mode: AggregationMode,
) -> Result<AnalysisOutcome, PipelineError>
where
    S: TextService<Error = ServiceError> + Sync,
{
    Pipeline::new(service, config)?.run_analysis(
        documents,
        credential,
        guiding_questions,
        mode,
        &CancelToken::new(),
    )
}
