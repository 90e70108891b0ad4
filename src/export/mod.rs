//! Export module for budget-ledger
//!
//! Provides full-ledger export in multiple formats:
//! - CSV: one row per record (spreadsheet-compatible)
//! - JSON: machine-readable, in the persisted layout
//! - YAML: the same envelope, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_records_csv;
pub use json::{export_full_json, ExportMetadata, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
