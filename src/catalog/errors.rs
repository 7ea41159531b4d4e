//! Catalog error types
//!
//! Every failure is a value returned to the caller; the catalog never halts
//! the process.

use thiserror::Error;

use super::record::Status;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Indexed field a key belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Code,
    Name,
}

impl KeyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyField::Code => "code",
            KeyField::Name => "name",
        }
    }
}

impl std::fmt::Display for KeyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Key absent from the index, or the record behind it is deleted
    #[error("Record not registered: {0}")]
    NotFound(String),

    #[error("Record already deleted: {0}")]
    AlreadyDeleted(String),

    /// Requested status transition would not change anything
    #[error("Record {key} is already {status}")]
    AlreadyInState { key: String, status: Status },

    #[error("Duplicate {field}: {key}")]
    DuplicateKey { field: KeyField, key: String },

    /// Indexes and record sequence disagree
    #[error("Catalog inconsistent: {0}")]
    Inconsistent(String),
}

impl CatalogError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "CATALOG_NOT_FOUND",
            CatalogError::AlreadyDeleted(_) => "CATALOG_ALREADY_DELETED",
            CatalogError::AlreadyInState { .. } => "CATALOG_ALREADY_IN_STATE",
            CatalogError::DuplicateKey { .. } => "CATALOG_DUPLICATE_KEY",
            CatalogError::Inconsistent(_) => "CATALOG_INCONSISTENT",
        }
    }

    /// Report `key` instead of whatever key the record layer filled in.
    pub(crate) fn with_key(self, key: &str) -> Self {
        match self {
            CatalogError::NotFound(_) => CatalogError::NotFound(key.to_string()),
            CatalogError::AlreadyDeleted(_) => CatalogError::AlreadyDeleted(key.to_string()),
            CatalogError::AlreadyInState { status, .. } => CatalogError::AlreadyInState {
                key: key.to_string(),
                status,
            },
            other => other,
        }
    }

    /// A no-op the caller reports rather than treats as a failure
    pub fn is_informational(&self) -> bool {
        matches!(self, CatalogError::AlreadyInState { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::NotFound("X".into()).code(), "CATALOG_NOT_FOUND");
        assert_eq!(
            CatalogError::AlreadyDeleted("X".into()).code(),
            "CATALOG_ALREADY_DELETED"
        );
        assert_eq!(
            CatalogError::DuplicateKey {
                field: KeyField::Name,
                key: "X".into()
            }
            .code(),
            "CATALOG_DUPLICATE_KEY"
        );
    }

    #[test]
    fn test_only_already_in_state_is_informational() {
        let noop = CatalogError::AlreadyInState {
            key: "ABCD1234".into(),
            status: Status::OnDisplay,
        };
        assert!(noop.is_informational());
        assert!(!CatalogError::NotFound("X".into()).is_informational());
        assert!(!CatalogError::Inconsistent("x".into()).is_informational());
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::DuplicateKey {
            field: KeyField::Code,
            key: "ABCD1234".into(),
        };
        assert_eq!(err.to_string(), "Duplicate code: ABCD1234");
    }
}
