//! Error types for the CLI application.

use gleaner_extract::ExtractError;
use gleaner_llm::ServiceError;
use gleaner_pipeline::PipelineError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analysis could not start or was cancelled
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The text service client could not be built
    #[error("Text service error: {0}")]
    Service(#[from] ServiceError),

    /// A single file could not be read (extract command only)
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Report could not be assembled or written
    #[error("Report error: {0}")]
    Report(String),

    /// Background task failed
    #[error("Task error: {0}")]
    Task(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),
}
