//! Core data models for budget-ledger
//!
//! This module contains the data structures of the ledger domain: records,
//! month buckets, month keys, money and ids.

pub mod bucket;
pub mod ids;
pub mod money;
pub mod month;
pub mod record;

pub use bucket::{MonthBucket, StoredBucket};
pub use ids::RecordId;
pub use money::Money;
pub use month::{parse_entry_date, DateParseError, MonthKey, MonthKeyError};
pub use record::{Record, RecordKind, StoredRecord, StoredRecordError};
