//! Audit trail of ledger changes
//!
//! Every record added to or deleted from the ledger is appended to
//! `audit.log` as one JSON line, so `budget history` can show what changed
//! and when.

mod entry;
mod trail;

pub use entry::{AuditAction, AuditEntry};
pub use trail::AuditLog;
