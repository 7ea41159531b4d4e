//! Observable catalog events
//!
//! Events are explicit and typed; the logger only ever sees their string form.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded
    ConfigLoaded,
    /// Catalog file read and indexes built
    CatalogLoaded,
    /// No catalog file yet; starting empty
    CatalogLoadMissing,
    /// Catalog file written
    CatalogSaved,

    // Record operations
    RecordInserted,
    RecordStatusChanged,
    RecordSoftDeleted,

    // Compaction
    CompactionBegin,
    CompactionComplete,

    /// Indexes disagree with the record sequence
    ConsistencyViolation,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::CatalogLoadMissing => "CATALOG_LOAD_MISSING",
            Event::CatalogSaved => "CATALOG_SAVED",
            Event::RecordInserted => "RECORD_INSERTED",
            Event::RecordStatusChanged => "RECORD_STATUS_CHANGED",
            Event::RecordSoftDeleted => "RECORD_SOFT_DELETED",
            Event::CompactionBegin => "COMPACTION_BEGIN",
            Event::CompactionComplete => "COMPACTION_COMPLETE",
            Event::ConsistencyViolation => "CONSISTENCY_VIOLATION",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
