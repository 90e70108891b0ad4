//! Reports module for budget-ledger
//!
//! Provides the printable monthly report.

pub mod monthly;

pub use monthly::{MonthlyReport, ReportFormat};
