//! YAML Export functionality
//!
//! Same envelope as the JSON export, written for people to read.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::LedgerExport;
use crate::storage::LedgerStore;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(store: &LedgerStore, writer: &mut W) -> LedgerResult<()> {
    let export = LedgerExport::from_store(store);
    let export_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# budget-ledger export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(
        writer,
        "# Months: {}, records: {}",
        export.metadata.month_count,
        export.record_count()
    )
    .map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, RecordKind};
    use chrono::NaiveDate;

    #[test]
    fn test_export_yaml() {
        let mut store = LedgerStore::in_memory();
        store
            .add_record(
                RecordKind::Expense,
                NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                Money::from_cents(120000),
                "Rent",
            )
            .unwrap();

        let mut buffer = Vec::new();
        export_full_yaml(&store, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();

        assert!(yaml.starts_with("# budget-ledger export"));
        assert!(yaml.contains("schema_version:"));
        assert!(yaml.contains("description: Rent"));

        let parsed: LedgerExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.schema_version, "1.0.0");
        assert_eq!(parsed.metadata.expense_count, 1);
        assert!(parsed.ledger.contains_key("2024-2"));
    }
}
