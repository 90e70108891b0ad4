//! budget-ledger - Month-by-month income and expense tracking for the terminal
//!
//! This library provides the core functionality of the `budget` command: a
//! ledger of income and expense records bucketed by calendar month, the
//! totals of each month, and printable monthly reports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, month keys, records, buckets)
//! - `storage`: The month-keyed ledger store and its JSON persistence
//! - `services`: Entry validation, month views and totals
//! - `audit`: Append-only trail of added and deleted records
//! - `display`: Terminal tables and colours
//! - `reports`: Monthly report in text, CSV and HTML
//! - `export`: Full-ledger export (JSON, YAML, CSV)
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_ledger::config::LedgerPaths;
//! use budget_ledger::services::EntryDraft;
//! use budget_ledger::models::RecordKind;
//! use budget_ledger::storage::Storage;
//!
//! let mut storage = Storage::open(LedgerPaths::new()?)?;
//! let draft = EntryDraft::new(RecordKind::Income, "Salary", "5000", "2024-03-01");
//! let outcome = storage.service().add_entry(&draft)?;
//! println!("Balance: {}", outcome.view.summary.balance);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
pub use logging::init_tracing;
