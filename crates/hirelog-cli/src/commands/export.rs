//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::Result;
use crate::output::Formatter;
use hirelog_store::{load_snapshot, write_csv};

/// Execute the export command.
pub fn execute_export(args: ExportArgs, formatter: &Formatter) -> Result<()> {
    let emails = load_snapshot(&args.input)?;
    write_csv(&args.csv, &emails)?;

    println!(
        "{}",
        formatter.success(&format!("Exported {} email(s) to {}", emails.len(), args.csv.display()))
    );
    Ok(())
}
