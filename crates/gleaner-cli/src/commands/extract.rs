//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, formatter: &Formatter) -> Result<()> {
    let document = gleaner_extract::load_path(&args.file)?;
    println!("{}", formatter.format_preview(&document, args.preview)?);
    Ok(())
}
