//! Month buckets
//!
//! A bucket holds every record of one calendar month, split into an income
//! sequence and an expense sequence. Both keep insertion order; use
//! [`MonthBucket::sorted_by_date`] before showing them to a user.

use serde::{Deserialize, Serialize};

use super::ids::RecordId;
use super::money::Money;
use super::record::{Record, RecordKind, StoredRecord};

/// The income and expense records of a single month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthBucket {
    income: Vec<Record>,
    expenses: Vec<Record>,
}

impl MonthBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn income(&self) -> &[Record] {
        &self.income
    }

    pub fn expenses(&self) -> &[Record] {
        &self.expenses
    }

    /// The sequence holding records of the given kind
    pub fn records(&self, kind: RecordKind) -> &[Record] {
        match kind {
            RecordKind::Income => &self.income,
            RecordKind::Expense => &self.expenses,
        }
    }

    fn records_mut(&mut self, kind: RecordKind) -> &mut Vec<Record> {
        match kind {
            RecordKind::Income => &mut self.income,
            RecordKind::Expense => &mut self.expenses,
        }
    }

    /// Append a record to the sequence matching its kind
    pub fn push(&mut self, record: Record) {
        self.records_mut(record.kind).push(record);
    }

    /// Remove the record with `id` from the `kind` sequence
    pub fn remove(&mut self, kind: RecordKind, id: &RecordId) -> Option<Record> {
        let records = self.records_mut(kind);
        let index = records.iter().position(|r| &r.id == id)?;
        Some(records.remove(index))
    }

    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.iter().find(|r| &r.id == id)
    }

    /// All records, income first
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.income.iter().chain(self.expenses.iter())
    }

    pub fn len(&self) -> usize {
        self.income.len() + self.expenses.len()
    }

    /// True once both sequences are empty
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }

    /// Sum of one sequence, or `None` if it does not fit in [`Money`]
    pub fn total(&self, kind: RecordKind) -> Option<Money> {
        Money::checked_sum(self.records(kind).iter().map(|r| r.amount))
    }

    /// Whether `amount` can join the `kind` sequence without its total
    /// overflowing
    pub fn has_room_for(&self, kind: RecordKind, amount: Money) -> bool {
        self.total(kind)
            .and_then(|total| total.checked_add(amount))
            .is_some()
    }

    /// A copy with both sequences ordered by ascending date
    ///
    /// The sort is stable, so records on the same day keep insertion order.
    pub fn sorted_by_date(&self) -> Self {
        let mut sorted = self.clone();
        sorted.income.sort_by_key(|r| r.date);
        sorted.expenses.sort_by_key(|r| r.date);
        sorted
    }

    pub fn to_stored(&self) -> StoredBucket {
        StoredBucket {
            income: self.income.iter().map(Record::to_stored).collect(),
            expenses: self.expenses.iter().map(Record::to_stored).collect(),
        }
    }
}

/// A bucket as it appears in the ledger file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredBucket {
    #[serde(default)]
    pub income: Vec<StoredRecord>,
    #[serde(default)]
    pub expenses: Vec<StoredRecord>,
}

impl StoredBucket {
    /// Every stored record tagged with the sequence it came from
    pub fn into_records(self) -> impl Iterator<Item = (RecordKind, StoredRecord)> {
        self.income
            .into_iter()
            .map(|r| (RecordKind::Income, r))
            .chain(self.expenses.into_iter().map(|r| (RecordKind::Expense, r)))
    }
}
