//! CSV Export functionality
//!
//! One row per record across every month, oldest month first.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::storage::LedgerStore;

/// Export every record to CSV, returning the number of rows written
pub fn export_records_csv<W: Write>(store: &LedgerStore, writer: &mut W) -> LedgerResult<usize> {
    let mut csv = csv::Writer::from_writer(writer);
    let export_err = |e: csv::Error| LedgerError::Export(e.to_string());

    csv.write_record(["ID", "Kind", "Month", "Date", "Label", "Amount"])
        .map_err(export_err)?;

    let mut rows = 0;
    for (key, record) in store.records() {
        let kind = record.kind.to_string();
        let month = key.to_string();
        let date = record.date.format("%Y-%m-%d").to_string();
        let amount = record.amount.to_string();

        csv.write_record([
            record.id.as_str(),
            kind.as_str(),
            month.as_str(),
            date.as_str(),
            record.label.as_str(),
            amount.as_str(),
        ])
        .map_err(export_err)?;
        rows += 1;
    }

    csv.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(rows)
}
