//! Error types for the pipeline
//!
//! Only conditions that stop a run are errors. Per-segment and per-file
//! failures are reported as [`gleaner_domain::Diagnostic`]s instead.

use thiserror::Error;

/// Errors that prevent an analysis run from starting or finishing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No credential for the text service was supplied
    #[error("No credential supplied for the text service")]
    MissingCredential,

    /// The run was cancelled; partial results were discarded
    #[error("Analysis cancelled")]
    Cancelled,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The segment worker pool could not be started
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}
