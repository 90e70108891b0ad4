//! JSON Export functionality
//!
//! Exports the whole ledger, in its persisted layout, inside a versioned
//! envelope.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::RecordKind;
use crate::storage::{LedgerSnapshot, LedgerStore};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Month key to bucket, exactly as stored in the ledger file
    pub ledger: LedgerSnapshot,

    pub metadata: ExportMetadata,
}

/// Export metadata for quick reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub month_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    /// Oldest populated month key
    pub earliest_month: Option<String>,
    /// Newest populated month key
    pub latest_month: Option<String>,
}

impl LedgerExport {
    /// Create a new export from the ledger
    pub fn from_store(store: &LedgerStore) -> Self {
        let keys = store.month_keys();
        let count = |kind: RecordKind| store.records().filter(|(_, r)| r.kind == kind).count();

        let metadata = ExportMetadata {
            month_count: keys.len(),
            income_count: count(RecordKind::Income),
            expense_count: count(RecordKind::Expense),
            earliest_month: keys.first().map(ToString::to_string),
            latest_month: keys.last().map(ToString::to_string),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            ledger: store.snapshot(),
            metadata,
        }
    }

    pub fn record_count(&self) -> usize {
        self.metadata.income_count + self.metadata.expense_count
    }
}

/// Export the full ledger to JSON format
pub fn export_full_json<W: Write>(
    store: &LedgerStore,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = LedgerExport::from_store(store);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}
