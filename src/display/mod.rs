//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display,
//! including tables and theme-aware colours.

pub mod ledger;
pub mod theme;

pub use ledger::{format_month_overview, format_month_view, format_record_table, format_summary};
pub use theme::Palette;
