//! Storage layer for budget-ledger
//!
//! Provides the month-keyed ledger store, its persistence backends and JSON
//! file helpers with atomic writes.

pub mod backend;
pub mod file_io;
pub mod ledger;

pub use backend::{JsonFileBackend, LedgerBackend, LedgerSnapshot, MemoryBackend};
pub use file_io::{read_json, write_bytes_atomic, write_json_atomic};
pub use ledger::{LedgerStore, LoadReport};

use crate::audit::AuditLog;
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::services::LedgerService;

/// Main storage coordinator: the ledger plus its audit trail
pub struct Storage {
    paths: LedgerPaths,
    pub ledger: LedgerStore,
    audit: AuditLog,
}

impl Storage {
    /// Open the ledger file under the given paths
    pub fn open(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            ledger: LedgerStore::open(JsonFileBackend::new(paths.ledger_file())),
            audit: AuditLog::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }

    /// A service over the ledger that records changes in the audit log
    pub fn service(&mut self) -> LedgerService<'_> {
        LedgerService::new(&mut self.ledger).with_audit(&self.audit)
    }
}
