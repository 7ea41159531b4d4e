//! Persistence subsystem for artcatalog
//!
//! Reads and writes the catalog as flat `Label: value` text blocks. The
//! catalog core never touches the filesystem; it only sees `StoredEntry`
//! values on load and hands over its record slice on save.

mod errors;
mod file;
mod format;

pub use errors::{LoadError, PersistenceError, PersistenceErrorCode, PersistenceResult, SaveError};
pub use file::{load_all, save_all};
pub use format::{check_writable, parse, write_records, StoredEntry};
