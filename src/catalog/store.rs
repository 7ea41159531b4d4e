//! Record store: the record sequence plus its code and name indexes
//!
//! # API
//!
//! - `insert(new)` - Append a record and index it under both keys
//! - `find(lookup)` - Resolve a live record by code or name
//! - `set_maintenance(lookup)` / `set_display(lookup)` - Status transitions
//! - `soft_delete(lookup)` - Logical delete; slot and index entries remain
//! - `compact()` - Physically drop deleted records and reassign locators
//!
//! # Invariants
//!
//! - Every record in `records` (deleted or not) has exactly one entry in
//!   `by_code` and one in `by_name`, both mapping to its position
//! - `by_code.len() == by_name.len() == records.len()`

use crate::index::{Locator, OrderedIndex};
use crate::observability::{Event, Logger};

use super::errors::{CatalogError, CatalogResult, KeyField};
use super::record::{NewRecord, Record, Status};

/// How a caller addresses a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Code(String),
    Name(String),
}

impl Lookup {
    pub fn code(code: impl Into<String>) -> Self {
        Lookup::Code(code.into())
    }

    pub fn name(name: impl Into<String>) -> Self {
        Lookup::Name(name.into())
    }

    /// The key text being looked up
    pub fn key(&self) -> &str {
        match self {
            Lookup::Code(key) | Lookup::Name(key) => key,
        }
    }

    pub fn field(&self) -> KeyField {
        match self {
            Lookup::Code(_) => KeyField::Code,
            Lookup::Name(_) => KeyField::Name,
        }
    }
}

/// Outcome of a compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Deleted records physically removed
    pub removed: usize,
    /// Surviving records whose locator changed
    pub relocated: usize,
    /// Records left in the sequence
    pub remaining: usize,
}

/// Record sequence with two secondary indexes.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
    by_code: OrderedIndex<String>,
    by_name: OrderedIndex<String>,
}

impl RecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted `(record, deleted)` pairs, in order.
    pub fn restore<I>(entries: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (NewRecord, bool)>,
    {
        let mut store = Self::new();
        for (new, deleted) in entries {
            let locator = store.insert(new)?;
            if deleted {
                store.records[locator].mark_deleted()?;
            }
        }
        Ok(store)
    }

    /// Append a record and index it.
    ///
    /// Returns `DuplicateKey` without mutating anything if either key is
    /// already indexed, including keys of deleted but uncompacted records.
    pub fn insert(&mut self, new: NewRecord) -> CatalogResult<Locator> {
        if self.by_code.contains(new.code.as_str()) {
            return Err(CatalogError::DuplicateKey {
                field: KeyField::Code,
                key: new.code,
            });
        }
        if self.by_name.contains(new.name.as_str()) {
            return Err(CatalogError::DuplicateKey {
                field: KeyField::Name,
                key: new.name,
            });
        }

        let locator = self.records.len();
        self.by_code.insert(new.code.clone(), locator);
        self.by_name.insert(new.name.clone(), locator);
        self.records.push(Record::from_new(new));

        Ok(locator)
    }

    /// Live record by code
    pub fn find_by_code(&self, code: &str) -> CatalogResult<&Record> {
        self.find(&Lookup::code(code))
    }

    /// Live record by name
    pub fn find_by_name(&self, name: &str) -> CatalogResult<&Record> {
        self.find(&Lookup::name(name))
    }

    /// Resolve a live record. Deleted records are reported as `NotFound`.
    pub fn find(&self, lookup: &Lookup) -> CatalogResult<&Record> {
        let locator = self.locate(lookup)?;
        match self.records.get(locator) {
            Some(record) if !record.is_deleted() => Ok(record),
            _ => Err(CatalogError::NotFound(lookup.key().to_string())),
        }
    }

    /// True if `code` is indexed (deleted records included)
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains(code)
    }

    /// True if `name` is indexed (deleted records included)
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains(name)
    }

    /// Put a record into maintenance
    pub fn set_maintenance(&mut self, lookup: &Lookup) -> CatalogResult<()> {
        self.record_mut(lookup)?
            .set_maintenance()
            .map_err(|e| e.with_key(lookup.key()))?;
        self.log_status_change(lookup, Status::InMaintenance);
        Ok(())
    }

    /// Put a record on display
    pub fn set_display(&mut self, lookup: &Lookup) -> CatalogResult<()> {
        self.record_mut(lookup)?
            .set_display()
            .map_err(|e| e.with_key(lookup.key()))?;
        self.log_status_change(lookup, Status::OnDisplay);
        Ok(())
    }

    /// Mark a record deleted. It stays in the sequence and both indexes
    /// until the next `compact()`.
    pub fn soft_delete(&mut self, lookup: &Lookup) -> CatalogResult<()> {
        self.record_mut(lookup)?
            .mark_deleted()
            .map_err(|e| e.with_key(lookup.key()))?;
        Logger::info(
            Event::RecordSoftDeleted.as_str(),
            &[("field", lookup.field().as_str()), ("key", lookup.key())],
        );
        Ok(())
    }

    /// Physically remove every deleted record.
    ///
    /// Deleted keys are removed from both trees, the sequence is compacted
    /// in place, and every survivor that moved gets its new position written
    /// back into both indexes.
    pub fn compact(&mut self) -> CompactionReport {
        Logger::trace(
            Event::CompactionBegin.as_str(),
            &[("records", &self.records.len().to_string())],
        );

        let mut report = CompactionReport::default();

        for record in self.records.iter().filter(|r| r.is_deleted()) {
            self.by_code.delete(record.code());
            self.by_name.delete(record.name());
            report.removed += 1;
        }

        if report.removed > 0 {
            self.records.retain(|r| !r.is_deleted());

            for (position, record) in self.records.iter().enumerate() {
                if self.by_code.search(record.code()) != Some(position) {
                    self.by_code.relocate(record.code(), position);
                    self.by_name.relocate(record.name(), position);
                    report.relocated += 1;
                }
            }
        }

        report.remaining = self.records.len();

        Logger::info(
            Event::CompactionComplete.as_str(),
            &[
                ("relocated", &report.relocated.to_string()),
                ("remaining", &report.remaining.to_string()),
                ("removed", &report.removed.to_string()),
            ],
        );

        report
    }

    /// Check that both indexes agree with the record sequence.
    pub fn verify_consistency(&self) -> CatalogResult<()> {
        let result = self.check_consistency();
        if let Err(e) = &result {
            Logger::error(Event::ConsistencyViolation.as_str(), &[("detail", &e.to_string())]);
        }
        result
    }

    fn check_consistency(&self) -> CatalogResult<()> {
        if self.by_code.len() != self.records.len() || self.by_name.len() != self.records.len() {
            return Err(CatalogError::Inconsistent(format!(
                "index sizes code={} name={} differ from record count {}",
                self.by_code.len(),
                self.by_name.len(),
                self.records.len()
            )));
        }

        for (position, record) in self.records.iter().enumerate() {
            if self.by_code.search(record.code()) != Some(position) {
                return Err(CatalogError::Inconsistent(format!(
                    "code {} does not resolve to position {}",
                    record.code(),
                    position
                )));
            }
            if self.by_name.search(record.name()) != Some(position) {
                return Err(CatalogError::Inconsistent(format!(
                    "name {} does not resolve to position {}",
                    record.name(),
                    position
                )));
            }
        }

        Ok(())
    }

    /// Every record in sequence order, deleted ones included
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records not marked deleted
    pub fn live_records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| !r.is_deleted())
    }

    /// Sequence length, deleted records included
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn live_len(&self) -> usize {
        self.live_records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Codes in ascending order
    pub fn code_keys(&self) -> Vec<&str> {
        self.by_code.keys().into_iter().map(String::as_str).collect()
    }

    /// Names in ascending order
    pub fn name_keys(&self) -> Vec<&str> {
        self.by_name.keys().into_iter().map(String::as_str).collect()
    }

    fn locate(&self, lookup: &Lookup) -> CatalogResult<Locator> {
        let index = match lookup {
            Lookup::Code(_) => &self.by_code,
            Lookup::Name(_) => &self.by_name,
        };
        index
            .search(lookup.key())
            .ok_or_else(|| CatalogError::NotFound(lookup.key().to_string()))
    }

    /// Indexed record, deleted or not
    fn record_mut(&mut self, lookup: &Lookup) -> CatalogResult<&mut Record> {
        let locator = self.locate(lookup)?;
        self.records.get_mut(locator).ok_or_else(|| {
            CatalogError::Inconsistent(format!(
                "{} {} points past the end of the record sequence",
                lookup.field(),
                lookup.key()
            ))
        })
    }

    fn log_status_change(&self, lookup: &Lookup, status: Status) {
        Logger::info(
            Event::RecordStatusChanged.as_str(),
            &[
                ("field", lookup.field().as_str()),
                ("key", lookup.key()),
                ("status", status.as_str()),
            ],
        );
    }
}
