//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod entry;
pub mod export;
pub mod ledger;
pub mod report;
pub mod theme;

pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use ledger::{
    handle_config, handle_delete, handle_history, handle_months, handle_show, handle_summary,
    DeleteArgs, HistoryArgs, MonthArgs,
};
pub use report::{handle_report_command, ReportArgs, REPORT_FAILURE_NOTICE};
pub use theme::{handle_theme_command, ThemeCommands};
