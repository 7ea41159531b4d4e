//! Observability subsystem for artcatalog
//!
//! - Structured logging (one JSON object per line on stderr)
//! - Typed lifecycle and operation events
//!
//! Observability is read-only: it never changes what an operation does.
//!
//! ```ignore
//! use artcatalog::observability::{Event, Logger};
//!
//! Logger::info(Event::CatalogSaved.as_str(), &[("records", "42")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};
