//! Persistence error types
//!
//! Error codes:
//! - LOAD_NOT_FOUND (catalog file does not exist; caller may start empty)
//! - LOAD_IO
//! - LOAD_MALFORMED (complete block with an unusable line)
//! - SAVE_IO

use std::fmt;
use std::io;

/// Persistence error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceErrorCode {
    LoadNotFound,
    LoadIo,
    LoadMalformed,
    SaveIo,
}

impl PersistenceErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            PersistenceErrorCode::LoadNotFound => "LOAD_NOT_FOUND",
            PersistenceErrorCode::LoadIo => "LOAD_IO",
            PersistenceErrorCode::LoadMalformed => "LOAD_MALFORMED",
            PersistenceErrorCode::SaveIo => "SAVE_IO",
        }
    }

    /// True for codes raised while reading
    pub fn is_load(&self) -> bool {
        !matches!(self, PersistenceErrorCode::SaveIo)
    }
}

impl fmt::Display for PersistenceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Persistence error with context
#[derive(Debug)]
pub struct PersistenceError {
    code: PersistenceErrorCode,
    message: String,
    /// 1-based line number for malformed input
    line: Option<usize>,
    source: Option<io::Error>,
}

/// Error raised while reading the catalog file
pub type LoadError = PersistenceError;

/// Error raised while writing the catalog file
pub type SaveError = PersistenceError;

impl PersistenceError {
    pub fn not_found(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: PersistenceErrorCode::LoadNotFound,
            message: message.into(),
            line: None,
            source: Some(source),
        }
    }

    pub fn load_io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: PersistenceErrorCode::LoadIo,
            message: message.into(),
            line: None,
            source: Some(source),
        }
    }

    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self {
            code: PersistenceErrorCode::LoadMalformed,
            message: message.into(),
            line: Some(line),
            source: None,
        }
    }

    pub fn save_io(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: PersistenceErrorCode::SaveIo,
            message: message.into(),
            line: None,
            source: Some(source),
        }
    }

    pub fn code(&self) -> PersistenceErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// True if the catalog file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        self.code == PersistenceErrorCode::LoadNotFound
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        if let Some(ref source) = self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;
