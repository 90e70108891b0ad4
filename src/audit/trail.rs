//! Append-only JSONL audit log

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{LedgerError, LedgerResult};
use crate::models::MonthKey;

use super::entry::AuditEntry;

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append one entry as a single line
    pub fn append(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let mut line = serde_json::to_string(entry)
            .map_err(|e| LedgerError::Audit(format!("cannot encode entry: {}", e)))?;
        line.push('\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()))
            .map_err(|e| LedgerError::Audit(format!("{}: {}", self.path.display(), e)))
    }

    /// The last `limit` entries, oldest first, optionally for one month only
    ///
    /// Lines that do not parse are skipped with a warning.
    pub fn recent(&self, limit: usize, month: Option<MonthKey>) -> LedgerResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LedgerError::Audit(format!("{}: {}", self.path.display(), e)));
            }
        };

        let mut entries: Vec<AuditEntry> = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(line = index + 1, error = %e, "skipping unreadable audit entry");
                    None
                }
            })
            .filter(|entry| month.map_or(true, |key| entry.month == key))
            .collect();

        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Record, RecordKind};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(month: u32, label: &str) -> Record {
        Record::new(
            RecordKind::Income,
            NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            Money::from_cents(100),
            label,
        )
    }

    #[test]
    fn test_append_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        let salary = record(3, "Salary");

        log.append(&AuditEntry::added(&salary)).unwrap();
        log.append(&AuditEntry::deleted(&salary)).unwrap();

        let entries = log.recent(10, None).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], AuditEntry { at: entries[0].at, ..AuditEntry::added(&salary) });
        assert_eq!(entries[1].id, salary.id);
    }

    #[test]
    fn test_recent_limits_and_filters_by_month() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        for (month, label) in [(1, "a"), (2, "b"), (1, "c"), (1, "d"), (2, "e")] {
            log.append(&AuditEntry::added(&record(month, label))).unwrap();
        }

        let labels = |entries: Vec<AuditEntry>| -> Vec<String> {
            entries.into_iter().map(|e| e.label).collect()
        };
        assert_eq!(labels(log.recent(2, None).unwrap()), ["d", "e"]);

        let january = MonthKey::new(2024, 0).unwrap();
        assert_eq!(labels(log.recent(10, Some(january)).unwrap()), ["a", "c", "d"]);
        assert_eq!(labels(log.recent(1, Some(january)).unwrap()), ["d"]);
    }

    #[test]
    fn test_missing_log_is_empty_and_bad_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path().join("audit.log"));
        assert!(!log.exists());
        assert!(log.recent(5, None).unwrap().is_empty());

        log.append(&AuditEntry::added(&record(3, "kept"))).unwrap();
        let mut contents = fs::read_to_string(log.path()).unwrap();
        contents.insert_str(0, "{half a line\n\n");
        fs::write(log.path(), contents).unwrap();

        let entries = log.recent(5, None).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "kept");
    }

    #[test]
    fn test_unwritable_log_is_an_audit_error() {
        let temp_dir = TempDir::new().unwrap();
        let log = AuditLog::new(temp_dir.path());

        let err = log.append(&AuditEntry::added(&record(3, "x"))).unwrap_err();
        assert!(matches!(err, LedgerError::Audit(_)));
    }
}
