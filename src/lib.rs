//! artcatalog - An art piece catalog with dual ordered indexes
//!
//! Records live in an append-oriented sequence and are reachable through two
//! unbalanced binary search trees, one keyed by code and one by name.

pub mod catalog;
pub mod cli;
pub mod index;
pub mod observability;
pub mod persistence;
pub mod validation;
