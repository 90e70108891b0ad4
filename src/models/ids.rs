//! Record identifiers
//!
//! A record id is the creation time in milliseconds followed by a short random
//! base-36 suffix, e.g. `1709251200000k3x9q`. Ids are opaque strings once
//! created; anything loaded from disk is accepted as-is.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

const SUFFIX_LEN: usize = 5;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique, immutable identifier of a ledger record
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new time-based id with a random suffix
    pub fn new() -> Self {
        Self::at_millis(Utc::now().timestamp_millis())
    }

    /// Create an id for the given creation time
    pub fn at_millis(millis: i64) -> Self {
        Self(format!("{}{}", millis, random_suffix()))
    }

    /// Wrap an existing id string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RecordIdParseError);
        }
        Ok(Self(s.to_string()))
    }
}

/// Error returned when an id string is blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIdParseError;

impl fmt::Display for RecordIdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record id cannot be empty")
    }
}

impl std::error::Error for RecordIdParseError {}

fn random_suffix() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = RecordId::at_millis(1_709_251_200_000);
        let s = id.as_str();
        assert!(s.starts_with("1709251200000"));
        assert_eq!(s.len(), 13 + SUFFIX_LEN);
        assert!(s[13..]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_same_millisecond_shares_prefix() {
        let a = RecordId::at_millis(42);
        let b = RecordId::at_millis(42);
        assert!(a.as_str().starts_with("42"));
        assert!(b.as_str().starts_with("42"));
        assert_eq!(a.as_str().len(), b.as_str().len());
    }

    #[test]
    fn test_id_serialization() {
        let id = RecordId::from_string("1709251200000abcde");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"1709251200000abcde\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_id_parse() {
        let id: RecordId = " 1709251200000abcde ".parse().unwrap();
        assert_eq!(id.as_str(), "1709251200000abcde");
        assert!("   ".parse::<RecordId>().is_err());
    }
}
