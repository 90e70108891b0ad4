//! The month-keyed ledger store
//!
//! Owns every record, grouped into one bucket per calendar month. The store is
//! loaded once when opened and written back as a full snapshot after every
//! add or delete. Invariants held at all times:
//!
//! - a record lives in the bucket of its own date's month,
//! - record ids are unique across the whole store,
//! - no bucket is ever empty,
//! - each bucket's income and expense totals fit in [`Money`].

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Money, MonthBucket, MonthKey, Record, RecordId, RecordKind, StoredRecordError,
};

use super::backend::{LedgerBackend, LedgerSnapshot, MemoryBackend};

/// What happened while turning a snapshot back into records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Records discarded because their amount, date or label was unusable
    pub dropped: usize,
    /// Records that were missing an id or duplicated another record's id
    pub reissued_ids: usize,
    /// Records found under a bucket that does not match their date
    pub rebucketed: usize,
    /// The stored snapshot could not be read at all
    pub unreadable: bool,
}

impl LoadReport {
    /// True when the in-memory ledger differs from what was on disk
    pub fn has_repairs(&self) -> bool {
        self.dropped > 0 || self.reissued_ids > 0 || self.rebucketed > 0
    }
}

/// Month-keyed collection of income and expense records
pub struct LedgerStore {
    backend: Box<dyn LedgerBackend>,
    months: BTreeMap<MonthKey, MonthBucket>,
    load_report: LoadReport,
}

impl LedgerStore {
    /// Load the ledger from a backend
    ///
    /// Never fails: a missing snapshot is an empty ledger, and an unreadable
    /// one is set aside and replaced by an empty ledger.
    pub fn open(backend: impl LedgerBackend + 'static) -> Self {
        let backend: Box<dyn LedgerBackend> = Box::new(backend);

        let (months, load_report) = match backend.load() {
            Ok(Some(snapshot)) => build_months(snapshot),
            Ok(None) => {
                debug!(location = %backend.describe(), "no ledger found, starting empty");
                (BTreeMap::new(), LoadReport::default())
            }
            Err(err) => {
                warn!(location = %backend.describe(), error = %err, "ledger unreadable, starting empty");
                match backend.quarantine() {
                    Ok(Some(moved)) => {
                        warn!(moved_to = %moved.display(), "unreadable ledger set aside")
                    }
                    Ok(None) => {}
                    Err(err) => warn!(error = %err, "could not set unreadable ledger aside"),
                }
                let report = LoadReport {
                    unreadable: true,
                    ..LoadReport::default()
                };
                (BTreeMap::new(), report)
            }
        };

        if load_report.has_repairs() {
            info!(
                loaded = load_report.loaded,
                dropped = load_report.dropped,
                reissued_ids = load_report.reissued_ids,
                rebucketed = load_report.rebucketed,
                "ledger repaired while loading"
            );
        }

        Self {
            backend,
            months,
            load_report,
        }
    }

    /// An empty ledger that lives only in memory
    pub fn in_memory() -> Self {
        Self::open(MemoryBackend::new())
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Where the ledger is persisted
    pub fn location(&self) -> String {
        self.backend.describe()
    }

    /// Add a record and persist the ledger
    ///
    /// The caller is responsible for input checks (positive amount, non-blank
    /// label). The store only refuses a record whose amount would overflow
    /// its month's total. If persisting fails the in-memory ledger is left as
    /// it was and the error is returned.
    pub fn add_record(
        &mut self,
        kind: RecordKind,
        date: NaiveDate,
        amount: Money,
        label: impl Into<String>,
    ) -> LedgerResult<Record> {
        let key = MonthKey::from_date(date);
        let fits = self
            .months
            .get(&key)
            .map_or(true, |bucket| bucket.has_room_for(kind, amount));
        if !fits {
            return Err(LedgerError::OutOfRange(format!(
                "{} would overflow the {} total for {}",
                amount,
                kind.to_string().to_lowercase(),
                key.display_name()
            )));
        }

        let record = Record::with_id(self.unique_id(), kind, date, amount, label);

        let previous = self.months.get(&key).cloned();
        self.months.entry(key).or_default().push(record.clone());
        self.commit(key, previous)?;

        debug!(id = %record.id, month = %key, %kind, "record added");
        Ok(record)
    }

    /// Remove a record from the given month and persist the ledger
    ///
    /// Unknown months and ids are a silent no-op that returns `Ok(None)` and
    /// writes nothing. A bucket left with no records is dropped.
    pub fn delete_record(
        &mut self,
        kind: RecordKind,
        id: &RecordId,
        key: MonthKey,
    ) -> LedgerResult<Option<Record>> {
        let Some(bucket) = self.months.get_mut(&key) else {
            return Ok(None);
        };

        let previous = bucket.clone();
        let Some(removed) = bucket.remove(kind, id) else {
            return Ok(None);
        };

        if bucket.is_empty() {
            self.months.remove(&key);
        }
        self.commit(key, Some(previous))?;

        debug!(%id, month = %key, %kind, "record deleted");
        Ok(Some(removed))
    }

    /// The bucket for a `(year, zero-based month)` pair
    ///
    /// Always returns a bucket; months with no records (or an out-of-range
    /// month index) give an empty one.
    pub fn query_month(&self, year: i32, month_index: u32) -> MonthBucket {
        MonthKey::new(year, month_index)
            .map(|key| self.query(key))
            .unwrap_or_default()
    }

    /// The bucket for a month key, or an empty bucket
    pub fn query(&self, key: MonthKey) -> MonthBucket {
        self.months.get(&key).cloned().unwrap_or_default()
    }

    /// Locate a record anywhere in the ledger
    pub fn find_record(&self, id: &RecordId) -> Option<(MonthKey, &Record)> {
        self.months
            .iter()
            .find_map(|(key, bucket)| bucket.find(id).map(|r| (*key, r)))
    }

    pub fn contains_id(&self, id: &RecordId) -> bool {
        self.find_record(id).is_some()
    }

    /// Months that hold at least one record, oldest first
    pub fn month_keys(&self) -> Vec<MonthKey> {
        self.months.keys().copied().collect()
    }

    /// Every record with its month, oldest month first
    pub fn records(&self) -> impl Iterator<Item = (MonthKey, &Record)> {
        self.months
            .iter()
            .flat_map(|(key, bucket)| bucket.iter().map(move |r| (*key, r)))
    }

    pub fn record_count(&self) -> usize {
        self.months.values().map(MonthBucket::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// The whole ledger in its persisted layout
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.months
            .iter()
            .map(|(key, bucket)| (key.to_string(), bucket.to_stored()))
            .collect()
    }

    /// Write the full snapshot to the backend
    pub fn save(&self) -> LedgerResult<()> {
        self.backend.save(&self.snapshot())
    }

    fn commit(&mut self, key: MonthKey, previous: Option<MonthBucket>) -> LedgerResult<()> {
        if let Err(err) = self.save() {
            match previous {
                Some(bucket) => {
                    self.months.insert(key, bucket);
                }
                None => {
                    self.months.remove(&key);
                }
            }
            return Err(err);
        }
        Ok(())
    }

    fn unique_id(&self) -> RecordId {
        loop {
            let id = RecordId::new();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }
}

fn build_months(snapshot: LedgerSnapshot) -> (BTreeMap<MonthKey, MonthBucket>, LoadReport) {
    let mut months: BTreeMap<MonthKey, MonthBucket> = BTreeMap::new();
    let mut seen: HashSet<RecordId> = HashSet::new();
    let mut report = LoadReport::default();

    for (stored_key, bucket) in snapshot {
        for (kind, stored) in bucket.into_records() {
            let mut record = match Record::from_stored(kind, stored) {
                Ok(record) => record,
                Err(StoredRecordError::MissingId(record)) => {
                    report.reissued_ids += 1;
                    *record
                }
                Err(err) => {
                    warn!(month = %stored_key, %kind, error = %err, "dropping unusable record");
                    report.dropped += 1;
                    continue;
                }
            };

            while seen.contains(&record.id) {
                warn!(id = %record.id, "duplicate record id, issuing a new one");
                record.id = RecordId::new();
                report.reissued_ids += 1;
            }
            seen.insert(record.id.clone());

            let key = record.month_key();
            let bucket = months.entry(key).or_default();
            if !bucket.has_room_for(kind, record.amount) {
                warn!(id = %record.id, month = %key, %kind, "dropping record that overflows the month total");
                report.dropped += 1;
                continue;
            }
            if key.to_string() != stored_key {
                debug!(id = %record.id, from = %stored_key, to = %key, "moving record to its month");
                report.rebucketed += 1;
            }

            bucket.push(record);
            report.loaded += 1;
        }
    }

    (months, report)
}
