//! Month totals
//!
//! Pure arithmetic over records: totals are summed in integer cents, so the
//! result does not depend on record order and never picks up float noise.
//! Sums are checked; a total that would overflow is an error, never a
//! wrapped or clamped number.

use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MonthBucket, Record, RecordKind};

/// Income, expenses and what is left over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`; negative when overspent
    pub balance: Money,
}

impl Summary {
    /// Summarize both sequences of a bucket
    pub fn of_bucket(bucket: &MonthBucket) -> LedgerResult<Self> {
        summarize(bucket.income(), bucket.expenses())
    }

    pub fn total(&self, kind: RecordKind) -> Money {
        match kind {
            RecordKind::Income => self.total_income,
            RecordKind::Expense => self.total_expenses,
        }
    }
}

/// Total the income and expense records and derive the balance
pub fn summarize(income: &[Record], expenses: &[Record]) -> LedgerResult<Summary> {
    let total = |records: &[Record], what: &str| {
        Money::checked_sum(records.iter().map(|r| r.amount))
            .ok_or_else(|| LedgerError::OutOfRange(format!("{} total overflows", what)))
    };
    let total_income = total(income, "income")?;
    let total_expenses = total(expenses, "expense")?;
    let balance = total_income
        .checked_sub(total_expenses)
        .ok_or_else(|| LedgerError::OutOfRange("balance overflows".to_string()))?;

    Ok(Summary {
        total_income,
        total_expenses,
        balance,
    })
}
