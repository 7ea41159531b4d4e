//! Art-piece record and its status state machine
//!
//! ```text
//!   OnDisplay  <---->  InMaintenance
//!        \                 /
//!         +--> deleted <--+      (one-way, both states)
//! ```
//!
//! Once deleted, a record refuses every transition.

use std::fmt;
use std::str::FromStr;

use super::errors::{CatalogError, CatalogResult};

/// Exhibition status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InMaintenance,
    OnDisplay,
}

impl Status {
    /// Persisted / displayed form
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InMaintenance => "IN MAINTENANCE",
            Status::OnDisplay => "ON DISPLAY",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN MAINTENANCE" | "MAINTENANCE" => Ok(Status::InMaintenance),
            "ON DISPLAY" | "DISPLAY" => Ok(Status::OnDisplay),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Field values for a record about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub year: String,
    pub status: Status,
}

impl NewRecord {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        year: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
            year: year.into(),
            status,
        }
    }
}

/// A stored art piece.
///
/// `code` and `name` never change after construction; `status` and
/// `deleted` only change through the transition methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    code: String,
    name: String,
    price: f64,
    year: String,
    status: Status,
    deleted: bool,
}

impl Record {
    pub(crate) fn from_new(new: NewRecord) -> Self {
        Self {
            code: new.code,
            name: new.name,
            price: new.price,
            year: new.year,
            status: new.status,
            deleted: false,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// OnDisplay -> InMaintenance
    pub(crate) fn set_maintenance(&mut self) -> CatalogResult<()> {
        self.transition_to(Status::InMaintenance)
    }

    /// InMaintenance -> OnDisplay
    pub(crate) fn set_display(&mut self) -> CatalogResult<()> {
        self.transition_to(Status::OnDisplay)
    }

    /// Logical delete. Allowed exactly once.
    pub(crate) fn mark_deleted(&mut self) -> CatalogResult<()> {
        if self.deleted {
            return Err(CatalogError::AlreadyDeleted(self.code.clone()));
        }
        self.deleted = true;
        Ok(())
    }

    fn transition_to(&mut self, target: Status) -> CatalogResult<()> {
        if self.deleted {
            return Err(CatalogError::NotFound(self.code.clone()));
        }
        if self.status == target {
            return Err(CatalogError::AlreadyInState {
                key: self.code.clone(),
                status: target,
            });
        }
        self.status = target;
        Ok(())
    }
}
