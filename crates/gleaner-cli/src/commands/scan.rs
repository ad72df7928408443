//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::{CliError, Result};
use crate::loader::load_documents;
use crate::output::Formatter;
use gleaner_pipeline::{parse_keywords, scan_keywords};

/// Execute the scan command.
pub async fn execute_scan(args: ScanArgs, formatter: &Formatter) -> Result<()> {
    if parse_keywords(&args.questions).is_empty() {
        return Err(CliError::InvalidInput("No keywords provided".to_string()));
    }

    let (documents, diagnostics) = load_documents(&args.files);
    let hits = scan_keywords(&args.questions, &documents);

    println!("{}", formatter.format_keyword_hits(&hits)?);
    if !diagnostics.is_empty() {
        eprintln!("{}", formatter.format_diagnostics(&diagnostics)?);
    }

    Ok(())
}
