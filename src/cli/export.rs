//! CLI command for data export

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::LedgerResult;
use crate::export::{export_full_json, export_full_yaml, export_records_csv};
use crate::storage::{write_bytes_atomic, Storage};

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
    /// CSV format (one row per record)
    Csv,
}

/// Arguments of the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file path
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> LedgerResult<()> {
    let mut buffer = Vec::new();

    match args.format {
        ExportFormat::Json => export_full_json(&storage.ledger, &mut buffer, args.pretty)?,
        ExportFormat::Yaml => export_full_yaml(&storage.ledger, &mut buffer)?,
        ExportFormat::Csv => {
            export_records_csv(&storage.ledger, &mut buffer)?;
        }
    }

    write_bytes_atomic(&args.output, &buffer)?;

    println!(
        "Exported {} records to: {}",
        storage.ledger.record_count(),
        args.output.display()
    );
    Ok(())
}
