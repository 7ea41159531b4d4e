//! Ordered index subsystem for artcatalog
//!
//! Indexes are derived, in-memory-only state. They map an ordering key to a
//! locator (position in the record sequence) and never own records.
//!
//! # Design Principles
//!
//! - Unbalanced BST: depth is a function of insertion order only
//! - Owned subtrees: mutation moves subtrees in and out, no parent links
//! - Infallible: absence is `None`, never an error
//!
//! # Invariants
//!
//! - In-order traversal yields strictly ascending keys
//! - At most one entry per key

mod bst;

pub use bst::{Locator, OrderedIndex};
