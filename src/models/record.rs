//! Income and expense records
//!
//! A record is one financial event: an id, a calendar date, a positive amount
//! and a label. The label is the income *source* or the expense *description*,
//! which is also how the two kinds name the field on disk.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecordId;
use super::money::Money;
use super::month::{parse_entry_date, MonthKey};

/// Whether a record is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Income, RecordKind::Expense];

    /// Name of the sequence holding this kind inside a month bucket
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expenses",
        }
    }

    /// Column heading for the label field
    pub fn label_title(&self) -> &'static str {
        match self {
            Self::Income => "Source",
            Self::Expense => "Description",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "expenses" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown record kind: {}", other)),
        }
    }
}

/// One income or expense entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    pub date: NaiveDate,
    pub amount: Money,
    pub label: String,
}

impl Record {
    /// Create a record with a freshly generated id
    pub fn new(kind: RecordKind, date: NaiveDate, amount: Money, label: impl Into<String>) -> Self {
        Self::with_id(RecordId::new(), kind, date, amount, label)
    }

    pub fn with_id(
        id: RecordId,
        kind: RecordKind,
        date: NaiveDate,
        amount: Money,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            date,
            amount,
            label: label.into(),
        }
    }

    /// The month bucket this record belongs in
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Convert to the persisted layout
    pub fn to_stored(&self) -> StoredRecord {
        let amount = if self.amount.cents() % 100 == 0 {
            serde_json::Value::from(self.amount.units())
        } else {
            serde_json::Value::from(self.amount.as_decimal())
        };

        let (source, description) = match self.kind {
            RecordKind::Income => (Some(self.label.clone()), None),
            RecordKind::Expense => (None, Some(self.label.clone())),
        };

        StoredRecord {
            id: self.id.to_string(),
            date: self.date.format("%Y-%m-%d").to_string(),
            amount,
            source,
            description,
        }
    }

    /// Rebuild a record from its persisted layout
    ///
    /// Rejects entries whose amount is missing, non-numeric, non-finite or not
    /// positive, whose date does not parse, or whose label is blank. A blank
    /// id is reported separately so the caller can decide to re-issue one.
    pub fn from_stored(kind: RecordKind, stored: StoredRecord) -> Result<Self, StoredRecordError> {
        let date = parse_entry_date(&stored.date)
            .map_err(|e| StoredRecordError::Date(e.to_string()))?;

        let amount = match &stored.amount {
            serde_json::Value::Number(n) => n.as_f64().and_then(Money::from_decimal),
            serde_json::Value::String(s) => Money::parse(s).ok(),
            _ => None,
        }
        .ok_or_else(|| StoredRecordError::Amount(stored.amount.to_string()))?;

        if !amount.is_positive() {
            return Err(StoredRecordError::Amount(stored.amount.to_string()));
        }

        let label = match kind {
            RecordKind::Income => stored.source.or(stored.description),
            RecordKind::Expense => stored.description.or(stored.source),
        }
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or(StoredRecordError::Label)?;

        let id = stored.id.trim();
        if id.is_empty() {
            return Err(StoredRecordError::MissingId(Box::new(Self::new(
                kind, date, amount, label,
            ))));
        }

        Ok(Self::with_id(RecordId::from_string(id), kind, date, amount, label))
    }
}

/// A record as it appears in the ledger file
///
/// Fields are loose so that hand-edited or older files can be
/// loaded and cleaned record by record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub amount: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Reasons a persisted record cannot be loaded as-is
#[derive(Debug, Clone, PartialEq)]
pub enum StoredRecordError {
    Date(String),
    Amount(String),
    Label,
    /// The record is otherwise valid; it carries a newly issued id
    MissingId(Box<Record>),
}

impl fmt::Display for StoredRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(e) => write!(f, "bad date: {}", e),
            Self::Amount(a) => write!(f, "bad amount: {}", a),
            Self::Label => write!(f, "missing label"),
            Self::MissingId(_) => write!(f, "missing id"),
        }
    }
}

impl std::error::Error for StoredRecordError {}
