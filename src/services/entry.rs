//! Entry validation
//!
//! The checks a form applies before anything reaches the ledger: the label
//! must not be blank, the amount must be a positive number and the date must
//! parse. The store itself trusts its callers and does not repeat them.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_entry_date, Money, RecordKind};

/// Raw user input for a new income or expense entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub kind: RecordKind,
    pub label: String,
    pub amount: String,
    pub date: String,
}

impl EntryDraft {
    pub fn new(
        kind: RecordKind,
        label: impl Into<String>,
        amount: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }

    /// Check the draft and convert it into typed values
    pub fn validate(&self) -> LedgerResult<ValidEntry> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(LedgerError::Validation(format!(
                "{} cannot be empty",
                self.kind.label_title()
            )));
        }

        let amount = Money::parse(&self.amount)
            .map_err(|e| LedgerError::Validation(format!("Invalid amount: {}", e)))?;
        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Amount must be at least 0.01, got {}",
                self.amount.trim()
            )));
        }

        let date = parse_entry_date(&self.date)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        Ok(ValidEntry {
            kind: self.kind,
            date,
            amount,
            label: label.to_string(),
        })
    }
}

/// An entry that passed validation and can be filed in the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub amount: Money,
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_entry() {
        let draft = EntryDraft::new(RecordKind::Income, "  Salary ", "5000", "2024-03-01");
        let entry = draft.validate().unwrap();

        assert_eq!(entry.label, "Salary");
        assert_eq!(entry.amount.cents(), 500000);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_blank_label_rejected() {
        let err = EntryDraft::new(RecordKind::Expense, "   ", "10", "2024-03-01")
            .validate()
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Validation error: Description cannot be empty");
    }

    #[test]
    fn test_bad_amounts_rejected() {
        for amount in ["0", "-5", "abc", "", "NaN", "0.001", "10000000000000.01"] {
            let result = EntryDraft::new(RecordKind::Income, "Gift", amount, "2024-03-01").validate();
            assert!(result.is_err(), "amount {:?} should be rejected", amount);
        }
    }

    #[test]
    fn test_sub_cent_amount_message() {
        let err = EntryDraft::new(RecordKind::Expense, "Gum", "0.004", "2024-03-01")
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Amount must be at least 0.01, got 0.004"
        );
    }

    #[test]
    fn test_amount_rounds_half_up() {
        let entry = EntryDraft::new(RecordKind::Expense, "Snacks", "10.999", "2024-03-01")
            .validate()
            .unwrap();
        assert_eq!(entry.amount.to_string(), "11.00");
    }

    #[test]
    fn test_missing_or_bad_date_rejected() {
        for date in ["", "2024-13-01", "soon"] {
            let result = EntryDraft::new(RecordKind::Income, "Gift", "10", date).validate();
            assert!(matches!(result, Err(LedgerError::Validation(_))));
        }
    }
}
