//! Error type shared by the ledger, its storage and the CLI

use thiserror::Error;

use crate::models::RecordId;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Settings file or data directory could not be set up
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// Rejected input: blank label, bad amount or bad date
    #[error("Validation error: {0}")]
    Validation(String),

    /// A month total would no longer fit in a money amount
    #[error("Amount out of range: {0}")]
    OutOfRange(String),

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    /// The ledger snapshot could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// The audit log could not be appended to or read
    #[error("Audit log error: {0}")]
    Audit(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
