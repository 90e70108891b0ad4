//! Persistence backends for the ledger
//!
//! The ledger is always persisted as one full snapshot. A backend only needs
//! to read and replace that snapshot.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use chrono::Local;

use crate::error::LedgerResult;
use crate::models::StoredBucket;

use super::file_io::{read_json, write_json_atomic};

/// The persisted layout: `"{year}-{monthIndex}"` to that month's bucket
pub type LedgerSnapshot = BTreeMap<String, StoredBucket>;

/// Abstraction over where the ledger snapshot lives
pub trait LedgerBackend {
    /// Read the snapshot; `Ok(None)` when nothing has been stored yet
    fn load(&self) -> LedgerResult<Option<LedgerSnapshot>>;

    /// Replace the stored snapshot
    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()>;

    /// Move an unreadable snapshot out of the way before it is overwritten
    fn quarantine(&self) -> LedgerResult<Option<PathBuf>> {
        Ok(None)
    }

    /// Human-readable location, for logs and `config` output
    fn describe(&self) -> String;
}

/// Stores the snapshot as pretty-printed JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerBackend for JsonFileBackend {
    fn load(&self) -> LedgerResult<Option<LedgerSnapshot>> {
        read_json(&self.path)
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        write_json_atomic(&self.path, snapshot)
    }

    fn quarantine(&self) -> LedgerResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(format!(".corrupt-{}", Local::now().format("%Y%m%d%H%M%S")));
        let target = self.path.with_file_name(name);
        fs::rename(&self.path, &target)?;
        Ok(Some(target))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the snapshot in memory; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Rc<RefCell<Option<LedgerSnapshot>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(snapshot))),
        }
    }

    /// The last saved snapshot
    pub fn stored(&self) -> Option<LedgerSnapshot> {
        self.slot.borrow().clone()
    }
}

impl LedgerBackend for MemoryBackend {
    fn load(&self) -> LedgerResult<Option<LedgerSnapshot>> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, snapshot: &LedgerSnapshot) -> LedgerResult<()> {
        *self.slot.borrow_mut() = Some(snapshot.clone());
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_backend_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("budget_data.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn test_json_backend_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(temp_dir.path().join("budget_data.json"));

        let mut snapshot = LedgerSnapshot::new();
        snapshot.insert("2024-2".to_string(), StoredBucket::default());
        backend.save(&snapshot).unwrap();

        assert_eq!(backend.load().unwrap(), Some(snapshot));
    }

    #[test]
    fn test_quarantine_moves_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget_data.json");
        fs::write(&path, "{broken").unwrap();
        let backend = JsonFileBackend::new(&path);

        let moved = backend.quarantine().unwrap().unwrap();
        assert!(!path.exists());
        assert!(moved.exists());
        assert_eq!(fs::read_to_string(moved).unwrap(), "{broken");
    }

    #[test]
    fn test_memory_backend_clones_share_state() {
        let backend = MemoryBackend::new();
        let observer = backend.clone();
        assert!(observer.stored().is_none());

        backend.save(&LedgerSnapshot::new()).unwrap();
        assert_eq!(observer.stored(), Some(LedgerSnapshot::new()));
    }
}
