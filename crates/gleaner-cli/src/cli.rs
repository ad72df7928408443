//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use gleaner_pipeline::{AggregationMode, SynthesisKind};
use std::path::PathBuf;

/// Gleaner - Extract insights from interview and meeting transcripts.
#[derive(Debug, Parser)]
#[command(name = "gleaner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (insight text only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze transcript files and build a consolidated report
    Analyze(AnalyzeArgs),

    /// Show the text extracted from one file
    Extract(ExtractArgs),

    /// Count guiding keywords in files without calling the text service
    Scan(ScanArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Files to analyze (.txt, .docx, .pdf, .pptx)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Guiding questions or keywords (comma-separated)
    #[arg(short, long)]
    pub questions: Option<String>,

    /// Aggregation mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Synthesis variant for synthesized mode
    #[arg(short, long, value_enum)]
    pub synthesis: Option<SynthesisArg>,

    /// Write a report (.md, .docx or .json)
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Soft segment size in characters
    #[arg(long)]
    pub target_size: Option<usize>,

    /// Per-call payload ceiling in characters
    #[arg(long)]
    pub max_payload: Option<usize>,

    /// Segment calls in flight per document
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Disable the reply cache
    #[arg(long)]
    pub no_cache: bool,

    /// API key for the text service (defaults to the profile's key variable)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// File to extract
    pub file: PathBuf,

    /// Number of characters to show
    #[arg(long, default_value = "500")]
    pub preview: usize,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Files to scan
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Keywords (comma-separated)
    #[arg(short, long)]
    pub questions: String,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// API base URL
        #[arg(short, long)]
        endpoint: String,
        /// Chat model name
        #[arg(short, long)]
        model: String,
        /// Environment variable holding the API key
        #[arg(short = 'k', long, default_value = "OPENAI_API_KEY")]
        api_key_env: String,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Aggregation mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Join file insights without another call
    Verbatim,
    /// One extra synthesis call over all file insights
    Synthesized,
}

/// Synthesis variant argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SynthesisArg {
    /// Common themes and insights
    Themes,
    /// Holistic summary
    Summary,
    /// Labeled sections
    Sections,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for AggregationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Verbatim => AggregationMode::Verbatim,
            ModeArg::Synthesized => AggregationMode::Synthesized,
        }
    }
}

impl From<SynthesisArg> for SynthesisKind {
    fn from(kind: SynthesisArg) -> Self {
        match kind {
            SynthesisArg::Themes => SynthesisKind::Themes,
            SynthesisArg::Summary => SynthesisKind::Summary,
            SynthesisArg::Sections => SynthesisKind::Sections,
        }
    }
}
