//! Service layer for budget-ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! entry validation, month views with totals, and the audit trail.

pub mod entry;
pub mod ledger;
pub mod summary;

pub use entry::{EntryDraft, ValidEntry};
pub use ledger::{EntryOutcome, LedgerService, MonthOverview, MonthView};
pub use summary::{summarize, Summary};
