//! Gleaner CLI library.
//!
//! This library provides the core functionality for the Gleaner command-line interface,
//! including configuration management, command execution, report assembly and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod output;
pub mod report;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use report::{ReportAssembler, ReportFormat};
