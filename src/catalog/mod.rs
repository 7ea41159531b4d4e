//! Catalog subsystem for artcatalog
//!
//! Holds the canonical in-memory state: an append-oriented record sequence
//! and two ordered indexes over it (by code, by name).
//!
//! # Design Principles
//!
//! - Records are owned by the sequence; indexes hold positions only
//! - Logical delete first, physical removal only on compaction
//! - All conditions come back as `CatalogError`, never a panic
//!
//! # Invariants
//!
//! - Both indexes cover every uncompacted record, deleted or not
//! - After compaction each index entry resolves to its record's position

mod errors;
mod record;
mod store;

pub use errors::{CatalogError, CatalogResult, KeyField};
pub use record::{NewRecord, Record, Status};
pub use store::{CompactionReport, Lookup, RecordStore};
