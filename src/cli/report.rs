//! CLI command for the monthly report

use std::path::PathBuf;

use chrono::Local;
use clap::Args;

use crate::config::paths::LedgerPaths;
use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::reports::{MonthlyReport, ReportFormat};
use crate::storage::Storage;

use super::ledger::MonthArgs;

/// Shown when a report cannot be produced; details go to the log
pub const REPORT_FAILURE_NOTICE: &str =
    "Could not generate the report. Check that the logo file exists and the output directory is writable.";

/// Arguments of the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub month: MonthArgs,

    /// Output format: text, csv or html
    #[arg(short, long, default_value = "html")]
    pub format: ReportFormat,

    /// Directory to write the report to (defaults to the reports directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Image to embed in HTML reports (overrides the configured logo)
    #[arg(short, long)]
    pub logo: Option<PathBuf>,

    /// Print the report instead of writing a file
    #[arg(long)]
    pub print: bool,
}

/// Generate a monthly report
///
/// Either prints it or writes it to `{output_dir}/{prefix}_Report_{Month}_{Year}.{ext}`.
pub fn handle_report_command(
    storage: &Storage,
    paths: &LedgerPaths,
    settings: &Settings,
    args: ReportArgs,
) -> LedgerResult<()> {
    let key = args.month.resolve()?;
    let today = Local::now().date_naive();
    let report = MonthlyReport::generate(&storage.ledger, key, today, settings)?;

    let logo = args.logo.or_else(|| settings.report.logo_path.clone());

    if args.print {
        let bytes = report.render(args.format, logo.as_deref())?;
        print!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    }

    let dir = args.output_dir.unwrap_or_else(|| paths.reports_dir());
    let path = report.save(args.format, &dir, logo.as_deref())?;

    println!("{} written to: {}", report.subtitle(), path.display());
    Ok(())
}
