//! Console I/O for the CLI
//!
//! Everything here is generic over `BufRead` / `Write` so sessions can be
//! scripted in tests.

use std::io::{BufRead, Write};

use crate::catalog::{CatalogError, Record};

use super::errors::CliResult;

/// Print `label`, read one line. `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> CliResult<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Multi-line description of a live record
pub fn render_record(record: &Record) -> String {
    format!(
        "Code: {}\nName: {}\nPrice: {}\nYear: {}\nStatus: {}",
        record.code(),
        record.name(),
        record.price(),
        record.year(),
        record.status()
    )
}

/// One-line summary used by `list`
pub fn render_summary(record: &Record) -> String {
    format!(
        "{:<8}  {:<10}  {:>12}  {:<10}  {}",
        record.code(),
        record.name(),
        record.price(),
        record.year(),
        record.status()
    )
}

/// User-facing message for a failed or no-op catalog operation
pub fn render_catalog_error(err: &CatalogError) -> String {
    match err {
        CatalogError::NotFound(_) => "ERROR: This piece is not registered.".to_string(),
        CatalogError::AlreadyDeleted(_) => "ERROR: This piece is already deleted.".to_string(),
        CatalogError::AlreadyInState { status, .. } => {
            format!("The piece is already {}.", status.as_str().to_lowercase())
        }
        other => format!("ERROR: {}", other),
    }
}
