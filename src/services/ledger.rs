//! Ledger service
//!
//! Validates entries, applies them to the ledger, notes each change in the
//! audit log when one is attached and hands back the affected month so the
//! caller can decide what to redraw.

use serde::Serialize;
use tracing::warn;

use crate::audit::{AuditEntry, AuditLog};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{MonthBucket, MonthKey, Record, RecordId, RecordKind};
use crate::storage::LedgerStore;

use super::entry::EntryDraft;
use super::summary::Summary;

/// One month, ready for display: records sorted by date plus totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub key: MonthKey,
    pub bucket: MonthBucket,
    pub summary: Summary,
}

impl MonthView {
    pub fn of(store: &LedgerStore, key: MonthKey) -> LedgerResult<Self> {
        let bucket = store.query(key).sorted_by_date();
        let summary = Summary::of_bucket(&bucket)?;
        Ok(Self {
            key,
            bucket,
            summary,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.bucket.is_empty()
    }
}

/// The record a mutation touched and the month it touched
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub record: Record,
    pub view: MonthView,
}

/// Summary row for the list of populated months
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOverview {
    pub key: MonthKey,
    pub income_count: usize,
    pub expense_count: usize,
    pub summary: Summary,
}

/// Service for adding, removing and viewing ledger entries
pub struct LedgerService<'a> {
    ledger: &'a mut LedgerStore,
    audit: Option<&'a AuditLog>,
}

impl<'a> LedgerService<'a> {
    pub fn new(ledger: &'a mut LedgerStore) -> Self {
        Self {
            ledger,
            audit: None,
        }
    }

    pub fn with_audit(mut self, audit: &'a AuditLog) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate a draft and file it in the ledger
    pub fn add_entry(&mut self, draft: &EntryDraft) -> LedgerResult<EntryOutcome> {
        let entry = draft.validate()?;

        let record = self
            .ledger
            .add_record(entry.kind, entry.date, entry.amount, entry.label)?;
        self.note(AuditEntry::added(&record));

        let view = MonthView::of(self.ledger, record.month_key())?;
        Ok(EntryOutcome { record, view })
    }

    /// Delete a record from a known month
    ///
    /// Returns `Ok(None)` when nothing matched.
    pub fn delete_entry(
        &mut self,
        kind: RecordKind,
        id: &RecordId,
        key: MonthKey,
    ) -> LedgerResult<Option<EntryOutcome>> {
        let Some(record) = self.ledger.delete_record(kind, id, key)? else {
            return Ok(None);
        };
        self.note(AuditEntry::deleted(&record));

        let view = MonthView::of(self.ledger, key)?;
        Ok(Some(EntryOutcome { record, view }))
    }

    /// Delete a record when only its id is known
    pub fn delete_by_id(&mut self, id: &RecordId) -> LedgerResult<EntryOutcome> {
        let (key, kind) = self
            .ledger
            .find_record(id)
            .map(|(key, record)| (key, record.kind))
            .ok_or_else(|| LedgerError::RecordNotFound(id.clone()))?;

        self.delete_entry(kind, id, key)?
            .ok_or_else(|| LedgerError::RecordNotFound(id.clone()))
    }

    pub fn month_view(&self, key: MonthKey) -> LedgerResult<MonthView> {
        MonthView::of(self.ledger, key)
    }

    /// Totals for every populated month, oldest first
    pub fn overview(&self) -> LedgerResult<Vec<MonthOverview>> {
        self.ledger
            .month_keys()
            .into_iter()
            .map(|key| {
                let bucket = self.ledger.query(key);
                Ok(MonthOverview {
                    key,
                    income_count: bucket.income().len(),
                    expense_count: bucket.expenses().len(),
                    summary: Summary::of_bucket(&bucket)?,
                })
            })
            .collect()
    }

    /// The ledger change is already saved; a failed audit write is reported
    /// but never undoes it.
    fn note(&self, entry: AuditEntry) {
        let Some(audit) = self.audit else {
            return;
        };
        if let Err(err) = audit.append(&entry) {
            warn!(id = %entry.id, action = %entry.action, error = %err, "audit entry not written");
        }
    }
}
