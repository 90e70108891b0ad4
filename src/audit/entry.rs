//! One line of the audit log

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Money, MonthKey, Record, RecordId, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Added,
    Deleted,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => f.pad("added"),
            Self::Deleted => f.pad("deleted"),
        }
    }
}

/// A ledger change: which record, in which month, and what it held
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: DateTime<Utc>,
    pub action: AuditAction,
    pub kind: RecordKind,
    pub month: MonthKey,
    pub id: RecordId,
    pub date: NaiveDate,
    pub amount: Money,
    pub label: String,
}

impl AuditEntry {
    pub fn added(record: &Record) -> Self {
        Self::of(AuditAction::Added, record)
    }

    pub fn deleted(record: &Record) -> Self {
        Self::of(AuditAction::Deleted, record)
    }

    fn of(action: AuditAction, record: &Record) -> Self {
        Self {
            at: Utc::now(),
            action,
            kind: record.kind,
            month: record.month_key(),
            id: record.id.clone(),
            date: record.date,
            amount: record.amount,
            label: record.label.clone(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<7} {:<7} {:>7}  {} {:>14}  {} [{}]",
            self.at.format("%Y-%m-%d %H:%M UTC"),
            self.action,
            self.kind.to_string().to_lowercase(),
            self.month.to_string(),
            self.date.format("%Y-%m-%d"),
            self.amount.to_string(),
            self.label,
            self.id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rent() -> Record {
        Record::with_id(
            RecordId::from_string("1709596800000k3j9x"),
            RecordKind::Expense,
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            Money::from_cents(120000),
            "Rent",
        )
    }

    #[test]
    fn test_entry_carries_the_record_and_its_month() {
        let entry = AuditEntry::deleted(&rent());

        assert_eq!(entry.action, AuditAction::Deleted);
        assert_eq!(entry.kind, RecordKind::Expense);
        assert_eq!(entry.month, MonthKey::new(2024, 2).unwrap());
        assert_eq!(entry.amount, Money::from_cents(120000));
    }

    #[test]
    fn test_json_line_layout() {
        let mut entry = AuditEntry::added(&rent());
        entry.at = DateTime::parse_from_rfc3339("2024-03-05T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({
                "at": "2024-03-05T10:00:00Z",
                "action": "added",
                "kind": "expense",
                "month": "2024-2",
                "id": "1709596800000k3j9x",
                "date": "2024-03-05",
                "amount": 1200,
                "label": "Rent"
            })
        );
    }

    #[test]
    fn test_display() {
        let line = AuditEntry::added(&rent()).to_string();
        assert!(line.contains("added   expense"));
        assert!(line.contains("2024-2  2024-03-05"));
        assert!(line.ends_with("1200.00  Rent [1709596800000k3j9x]"));
    }
}
