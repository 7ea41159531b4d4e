//! Field validation for new catalog records
//!
//! Runs before `RecordStore::insert`. Code and name are normalized (trimmed,
//! uppercased) and checked for uniqueness against the live indexes, which
//! still hold deleted-but-uncompacted keys.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::catalog::{RecordStore, Status};

/// Maximum name length in characters
pub const MAX_NAME_LEN: usize = 10;

static CODE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn code_pattern() -> &'static Regex {
    CODE_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]{4}[0-9]{4}$").expect("code pattern is a valid regex")
    })
}

/// Validation failures, one per rejected input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The code must contain 4 letters followed by 4 digits: '{0}'")]
    BadCodeFormat(String),

    #[error("A piece with this code is already registered: {0}")]
    DuplicateCode(String),

    #[error("The name cannot be empty")]
    EmptyName,

    #[error("The name cannot exceed 10 characters: '{0}'")]
    NameTooLong(String),

    #[error("The name cannot contain control characters or line breaks: {0:?}")]
    NameControlCharacter(String),

    #[error("A piece with this name is already registered: {0}")]
    DuplicateName(String),

    #[error("The price must be a real number: '{0}'")]
    BadPrice(String),

    #[error("The price must be a positive value: '{0}'")]
    NonPositivePrice(String),

    #[error("The year cannot contain control characters or line breaks: {0:?}")]
    YearControlCharacter(String),

    #[error("Invalid option '{0}', enter '1' or '2'")]
    BadStatusChoice(String),
}

/// Normalize and check a record code.
pub fn validate_code(raw: &str, store: &RecordStore) -> Result<String, ValidationError> {
    let code = raw.trim().to_uppercase();
    if !code_pattern().is_match(&code) {
        return Err(ValidationError::BadCodeFormat(code));
    }
    if store.contains_code(&code) {
        return Err(ValidationError::DuplicateCode(code));
    }
    Ok(code)
}

/// Normalize and check a record name.
pub fn validate_name(raw: &str, store: &RecordStore) -> Result<String, ValidationError> {
    let name = raw.trim().to_uppercase();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().any(char::is_control) {
        return Err(ValidationError::NameControlCharacter(name));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong(name));
    }
    if store.contains_name(&name) {
        return Err(ValidationError::DuplicateName(name));
    }
    Ok(name)
}

/// Parse a positive price; `,` is accepted as the decimal separator.
pub fn validate_price(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let price: f64 = trimmed
        .replace(',', ".")
        .parse()
        .map_err(|_| ValidationError::BadPrice(trimmed.to_string()))?;

    if !price.is_finite() {
        return Err(ValidationError::BadPrice(trimmed.to_string()));
    }
    if price <= 0.0 {
        return Err(ValidationError::NonPositivePrice(trimmed.to_string()));
    }
    Ok(price)
}

/// Free-form year text. May be empty, must fit on one line.
pub fn validate_year(raw: &str) -> Result<String, ValidationError> {
    let year = raw.trim();
    if year.chars().any(char::is_control) {
        return Err(ValidationError::YearControlCharacter(year.to_string()));
    }
    Ok(year.to_string())
}

/// Menu choice for the initial status: `1` maintenance, `2` display.
pub fn validate_status_choice(raw: &str) -> Result<Status, ValidationError> {
    match raw.trim() {
        "1" => Ok(Status::InMaintenance),
        "2" => Ok(Status::OnDisplay),
        other => Err(ValidationError::BadStatusChoice(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Lookup, NewRecord};

    fn store_with_alpha() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .insert(NewRecord::new("AAAA1111", "ALPHA", 1.0, "", Status::OnDisplay))
            .unwrap();
        store
    }

    #[test]
    fn test_code_normalized() {
        let store = RecordStore::new();
        assert_eq!(validate_code("  abcd1234 ", &store), Ok("ABCD1234".to_string()));
    }

    #[test]
    fn test_code_format_rejected() {
        let store = RecordStore::new();
        for bad in ["ABC1234", "ABCD123", "ABCD12345", "1234ABCD", "AB_D1234", ""] {
            assert!(
                matches!(validate_code(bad, &store), Err(ValidationError::BadCodeFormat(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_code_uniqueness_includes_deleted() {
        let mut store = store_with_alpha();
        store.soft_delete(&Lookup::code("AAAA1111")).unwrap();

        assert_eq!(
            validate_code("aaaa1111", &store),
            Err(ValidationError::DuplicateCode("AAAA1111".into()))
        );
    }

    #[test]
    fn test_name_rules() {
        let store = store_with_alpha();

        assert_eq!(validate_name(" beta ", &store), Ok("BETA".to_string()));
        assert_eq!(validate_name("   ", &store), Err(ValidationError::EmptyName));
        assert!(matches!(
            validate_name("ABCDEFGHIJK", &store),
            Err(ValidationError::NameTooLong(_))
        ));
        assert_eq!(validate_name("ABCDEFGHIJ", &store), Ok("ABCDEFGHIJ".to_string()));
        assert_eq!(
            validate_name("alpha", &store),
            Err(ValidationError::DuplicateName("ALPHA".into()))
        );
    }

    #[test]
    fn test_line_breaks_rejected() {
        let store = RecordStore::new();

        assert_eq!(
            validate_name("a\nb", &store),
            Err(ValidationError::NameControlCharacter("A\nB".into()))
        );
        assert!(matches!(
            validate_name("mona\rlisa", &store),
            Err(ValidationError::NameControlCharacter(_))
        ));
        assert!(matches!(
            validate_name("a\tb", &store),
            Err(ValidationError::NameControlCharacter(_))
        ));
    }

    #[test]
    fn test_year_rules() {
        assert_eq!(validate_year(" circa 1700 "), Ok("circa 1700".to_string()));
        assert_eq!(validate_year(""), Ok(String::new()));
        assert_eq!(
            validate_year("19\n00"),
            Err(ValidationError::YearControlCharacter("19\n00".into()))
        );
        assert!(validate_year("1900\r\n1901").is_err());
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(validate_price("12.5"), Ok(12.5));
        assert_eq!(validate_price("12,5"), Ok(12.5));
        assert!(matches!(validate_price("0"), Err(ValidationError::NonPositivePrice(_))));
        assert!(matches!(validate_price("-3"), Err(ValidationError::NonPositivePrice(_))));
        assert!(matches!(validate_price("abc"), Err(ValidationError::BadPrice(_))));
        assert!(matches!(validate_price("inf"), Err(ValidationError::BadPrice(_))));
    }

    #[test]
    fn test_status_choice() {
        assert_eq!(validate_status_choice("1"), Ok(Status::InMaintenance));
        assert_eq!(validate_status_choice(" 2 "), Ok(Status::OnDisplay));
        assert!(validate_status_choice("3").is_err());
    }
}
