//! The end-to-end analysis pipeline

use crate::aggregator::{Aggregation, Aggregator};
use crate::cache::InsightCache;
use crate::cancel::CancelToken;
use crate::client::InsightClient;
use crate::config::{AggregationMode, AnalysisConfig};
use crate::error::PipelineError;
use crate::keywords::scan_keywords;
use crate::processor::{DocumentInsight, SegmentProcessor};
use crate::segmenter::Segmenter;
use crate::types::AnalysisOutcome;
use gleaner_domain::traits::TextService;
use gleaner_domain::{Credential, Document, FileInsights, RunId};
use gleaner_llm::ServiceError;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{info, warn};

/// Segments, analyzes and aggregates a batch of documents
///
/// Owns the client (and its cache) and, when `max_concurrency > 1`, a
/// bounded worker pool shared by every document of every run. Documents are
/// always processed one after another in upload order.
///
/// # Examples
///
/// ```
/// use gleaner_domain::{Credential, Document, SourceKind};
/// use gleaner_llm::MockProvider;
/// use gleaner_pipeline::{AggregationMode, AnalysisConfig, CancelToken, Pipeline};
///
/// let pipeline = Pipeline::new(MockProvider::new("insight"), AnalysisConfig::default()).unwrap();
/// let docs = vec![Document::new("a.txt", "Some text. More text", SourceKind::PlainText)];
///
/// let outcome = pipeline
///     .run_analysis(&docs, &Credential::new("key"), None, AggregationMode::Verbatim, &CancelToken::new())
///     .unwrap();
/// assert_eq!(outcome.insights.get("a.txt"), Some("insight"));
/// ```
pub struct Pipeline<S> {
    client: InsightClient<S>,
    config: AnalysisConfig,
    pool: Option<ThreadPool>,
}

impl<S> Pipeline<S>
where
    S: TextService<Error = ServiceError> + Sync,
{
    /// Build a pipeline; fails on invalid configuration
    pub fn new(service: S, config: AnalysisConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;

        let mut client = InsightClient::new(service, config.max_payload_chars);
        if config.cache_enabled {
            client = client.with_cache(InsightCache::new());
        }

        let pool = if config.max_concurrency > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(config.max_concurrency)
                .thread_name(|i| format!("gleaner-segment-{}", i))
                .build()
                .map_err(|e| PipelineError::WorkerPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            client,
            config,
            pool,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The size-guarded client
    pub fn client(&self) -> &InsightClient<S> {
        &self.client
    }

    /// Segmenter built from the configured sizes
    pub fn segmenter(&self) -> Segmenter {
        Segmenter::new(self.config.target_segment_chars, self.config.max_payload_chars)
    }

    /// Produce the insight text for one document
    pub fn process_document(
        &self,
        document: &Document,
        credential: &Credential,
        cancel: &CancelToken,
    ) -> Result<DocumentInsight, PipelineError> {
        let processor = SegmentProcessor::new(&self.client, self.segmenter());
        let processor = match &self.pool {
            Some(pool) => processor.with_pool(pool),
            None => processor,
        };
        processor.process(document, credential, cancel)
    }

    /// Fold insights into the consolidated report
    pub fn aggregate(
        &self,
        insights: &FileInsights,
        credential: &Credential,
        mode: AggregationMode,
        guiding_questions: Option<&str>,
    ) -> Aggregation {
        Aggregator::new(&self.client, self.config.synthesis).aggregate(
            insights,
            credential,
            mode,
            guiding_questions,
        )
    }

    /// Analyze `documents` and build the consolidated report
    ///
    /// Fails only when no credential is supplied or the run is cancelled.
    /// Every per-segment or synthesis failure is returned as a diagnostic in
    /// the outcome. An empty document list yields an empty outcome without
    /// any service call.
    pub fn run_analysis(
        &self,
        documents: &[Document],
        credential: &Credential,
        guiding_questions: Option<&str>,
        mode: AggregationMode,
        cancel: &CancelToken,
    ) -> Result<AnalysisOutcome, PipelineError> {
        if credential.is_blank() {
            return Err(PipelineError::MissingCredential);
        }

        let run_id = RunId::new();
        info!(
            run_id = %run_id,
            documents = documents.len(),
            mode = ?mode,
            concurrency = self.config.max_concurrency,
            "Starting analysis"
        );

        if documents.is_empty() {
            return Ok(AnalysisOutcome::empty(run_id));
        }

        let mut insights = FileInsights::new();
        let mut diagnostics = Vec::new();

        for document in documents {
            cancel.check()?;
            let insight = self.process_document(document, credential, cancel)?;

            diagnostics.extend(insight.diagnostics);
            if insights.insert(insight.name, insight.text).is_some() {
                warn!(document = document.name(), "Duplicate document name, keeping the later insight");
            }
        }

        cancel.check()?;
        let aggregation = self.aggregate(&insights, credential, mode, guiding_questions);
        diagnostics.extend(aggregation.diagnostics);

        let keyword_hits = guiding_questions
            .map(|questions| scan_keywords(questions, documents))
            .unwrap_or_default();

        info!(
            run_id = %run_id,
            diagnostics = diagnostics.len(),
            synthesized = aggregation.report.synthesized,
            "Analysis complete"
        );

        Ok(AnalysisOutcome {
            run_id,
            insights,
            report: aggregation.report,
            diagnostics,
            keyword_hits,
        })
    }

    /// [`run_analysis`](Self::run_analysis) with the configured aggregation mode
    pub fn run(
        &self,
        documents: &[Document],
        credential: &Credential,
        guiding_questions: Option<&str>,
        cancel: &CancelToken,
    ) -> Result<AnalysisOutcome, PipelineError> {
        self.run_analysis(
            documents,
            credential,
            guiding_questions,
            self.config.aggregation,
            cancel,
        )
    }
}
