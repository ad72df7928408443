//! SegmentProcessor - one document through the text service, segment by segment

use crate::cancel::CancelToken;
use crate::client::{InsightClient, Reply};
use crate::error::PipelineError;
use crate::prompt::segment_messages;
use crate::segmenter::Segmenter;
use gleaner_domain::traits::TextService;
use gleaner_domain::{Credential, Diagnostic, DiagnosticKind, Document, Scope, Segment};
use gleaner_llm::ServiceError;
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

/// Insight text for one document plus what went wrong producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInsight {
    /// Document name
    pub name: String,

    /// Successful segment replies, trimmed, in segment order, joined by one space
    pub text: String,

    /// Number of segments the document was cut into
    pub segments: usize,

    /// Number of segments whose call failed
    pub failed: usize,

    /// Per-segment failures and truncation warnings
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the segmenter and client over one document
///
/// Segment failures never escape: a failed segment adds nothing to the
/// accumulator and is reported as a [`DiagnosticKind::Service`] diagnostic.
/// With a worker pool, calls run in parallel and results are reassembled by
/// segment index, so the text is the same as a sequential run.
pub struct SegmentProcessor<'a, S> {
    client: &'a InsightClient<S>,
    segmenter: Segmenter,
    pool: Option<&'a ThreadPool>,
}

impl<'a, S> SegmentProcessor<'a, S>
where
    S: TextService<Error = ServiceError> + Sync,
{
    /// Create a sequential processor
    pub fn new(client: &'a InsightClient<S>, segmenter: Segmenter) -> Self {
        Self {
            client,
            segmenter,
            pool: None,
        }
    }

    /// Dispatch segment calls on `pool`
    pub fn with_pool(mut self, pool: &'a ThreadPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Produce the insight text for `document`
    ///
    /// Returns `Err(Cancelled)` when `cancel` fires before every segment was
    /// dispatched; the partial accumulator is discarded.
    pub fn process(
        &self,
        document: &Document,
        credential: &Credential,
        cancel: &CancelToken,
    ) -> Result<DocumentInsight, PipelineError> {
        let name = document.name();
        let segments: Vec<Segment<'_>> = self.segmenter.segments(document.text()).collect();

        info!(
            document = name,
            chars = document.char_len(),
            segments = segments.len(),
            "Processing document"
        );

        let outcomes: Vec<Result<Reply, ServiceError>> = match self.pool {
            Some(pool) => pool.install(|| {
                segments
                    .par_iter()
                    .map(|segment| self.process_segment(name, segment, credential, cancel))
                    .collect::<Result<Vec<_>, _>>()
            })?,
            None => segments
                .iter()
                .map(|segment| self.process_segment(name, segment, credential, cancel))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut accumulator = String::new();
        let mut diagnostics = Vec::new();
        let mut failed = 0;

        for (segment, outcome) in segments.iter().zip(outcomes) {
            let scope = Scope::Segment(name.to_string(), segment.index);
            match outcome {
                Ok(reply) => {
                    if let Some(cut) = reply.truncation {
                        diagnostics.push(Diagnostic::new(
                            scope,
                            DiagnosticKind::Truncation,
                            format!(
                                "payload truncated from {} to {} characters",
                                cut.original_chars, cut.truncated_chars
                            ),
                        ));
                    }
                    accumulator.push_str(reply.text.trim());
                    accumulator.push(' ');
                }
                Err(error) => {
                    warn!(document = name, segment = segment.index, error = %error, "Segment failed");
                    failed += 1;
                    diagnostics.push(Diagnostic::new(
                        scope,
                        DiagnosticKind::Service,
                        error.to_string(),
                    ));
                }
            }
        }

        if failed > 0 {
            warn!(document = name, failed, total = segments.len(), "Document has failed segments");
        }

        Ok(DocumentInsight {
            name: name.to_string(),
            text: accumulator.trim().to_string(),
            segments: segments.len(),
            failed,
            diagnostics,
        })
    }

    fn process_segment(
        &self,
        name: &str,
        segment: &Segment<'_>,
        credential: &Credential,
        cancel: &CancelToken,
    ) -> Result<Result<Reply, ServiceError>, PipelineError> {
        cancel.check()?;

        if self.segmenter.is_oversize(segment) {
            debug!(
                document = name,
                segment = segment.index,
                chars = segment.char_len(),
                "Segment exceeds the per-call ceiling"
            );
        }
        debug!(document = name, segment = segment.index, "Requesting segment insight");

        Ok(self.client.request(&segment_messages(segment.text), credential))
    }
}
