//! CLI command for data export
//!
//! Writes the filtered, sorted transaction list as CSV.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use super::transaction::FilterArgs;
use crate::error::{FinTrackError, FinTrackResult};
use crate::export::{export_file_name, export_transactions_csv};
use crate::reports::transactions::filter_transactions;
use crate::storage::{self, Storage};

/// Options for the CSV export
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Output file path ("-" for stdout), defaults to fintrack-transactions-<date>.csv
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    today: NaiveDate,
    args: ExportArgs,
) -> FinTrackResult<()> {
    let filter = args.filter.to_filter_state(storage)?;
    let snapshot = storage::snapshot(storage)?;
    let rows = filter_transactions(&snapshot.transactions, &snapshot.categories, &filter);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(export_file_name(today)));

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        return export_transactions_csv(&rows, stdout.lock());
    }

    let file = File::create(&output).map_err(|e| {
        FinTrackError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    export_transactions_csv(&rows, BufWriter::new(file))?;

    println!("Exported {} transactions to: {}", rows.len(), output.display());

    Ok(())
}
