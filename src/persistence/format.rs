//! Catalog text format
//!
//! One block per record, five `Label: value` lines and a blank separator:
//!
//! ```text
//! Code: AAAA1111
//! Name: ALPHA
//! Price: 1500.5
//! Year: 1890
//! Status: ON DISPLAY
//!
//! ```
//!
//! A logically deleted record keeps its block, with `, DELETED` appended to
//! the status value. Blank lines between blocks are skipped; a block cut
//! short by end of input is dropped.

use std::io::{self, BufRead, Write};

use crate::catalog::{NewRecord, Record, Status};

use super::errors::{PersistenceError, PersistenceResult};

const LABELS: [&str; 5] = ["Code", "Name", "Price", "Year", "Status"];
const DELETED_MARKER: &str = "DELETED";

/// One record as read back from disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEntry {
    pub record: NewRecord,
    pub deleted: bool,
}

impl StoredEntry {
    pub fn into_parts(self) -> (NewRecord, bool) {
        (self.record, self.deleted)
    }
}

/// Parse every complete block from `reader`.
pub fn parse<R: BufRead>(reader: R) -> PersistenceResult<Vec<StoredEntry>> {
    let mut entries = Vec::new();
    let mut block: Vec<(usize, String)> = Vec::with_capacity(LABELS.len());

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| PersistenceError::load_io("Failed to read catalog line", e))?;
        if line.trim().is_empty() {
            continue;
        }

        block.push((i + 1, line));
        if block.len() == LABELS.len() {
            entries.push(decode_block(&block)?);
            block.clear();
        }
    }

    Ok(entries)
}

fn decode_block(block: &[(usize, String)]) -> PersistenceResult<StoredEntry> {
    let mut values = [""; 5];
    for (slot, ((line_no, line), label)) in block.iter().zip(LABELS).enumerate() {
        values[slot] = field_value(*line_no, line, label)?;
    }
    let [code, name, price, year, status] = values;

    let price_line = block[2].0;
    let price = decode_price(price_line, price)?;

    let status_line = block[4].0;
    let (status, deleted) = match status.split_once(',') {
        Some((status, marker)) if marker.trim().eq_ignore_ascii_case(DELETED_MARKER) => {
            (status, true)
        }
        Some((_, marker)) => {
            return Err(PersistenceError::malformed(
                status_line,
                format!("unknown status marker '{}'", marker.trim()),
            ))
        }
        None => (status, false),
    };
    let status: Status = status
        .parse()
        .map_err(|e| PersistenceError::malformed(status_line, e))?;

    Ok(StoredEntry {
        record: NewRecord::new(code, name, price, year, status),
        deleted,
    })
}

/// Prices on disk obey the same rule as typed input: finite and positive.
fn decode_price(line_no: usize, raw: &str) -> PersistenceResult<f64> {
    let price: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| PersistenceError::malformed(line_no, format!("invalid price '{}'", raw)))?;

    if !price.is_finite() || price <= 0.0 {
        return Err(PersistenceError::malformed(
            line_no,
            format!("price must be a positive value, found '{}'", raw),
        ));
    }
    Ok(price)
}

fn field_value<'a>(line_no: usize, line: &'a str, label: &str) -> PersistenceResult<&'a str> {
    let (found, value) = line.split_once(':').ok_or_else(|| {
        PersistenceError::malformed(line_no, format!("expected '{}: <value>'", label))
    })?;

    if !found.trim().eq_ignore_ascii_case(label) {
        return Err(PersistenceError::malformed(
            line_no,
            format!("expected label '{}', found '{}'", label, found.trim()),
        ));
    }

    Ok(value.trim())
}

/// Fail with `InvalidData` if any text field would break the line format.
pub fn check_writable(records: &[Record]) -> io::Result<()> {
    for record in records {
        for (label, value) in [
            ("Code", record.code()),
            ("Name", record.name()),
            ("Year", record.year()),
        ] {
            if value.contains(&['\n', '\r'][..]) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{} of {:?} contains a line break", label, record.code()),
                ));
            }
        }
    }
    Ok(())
}

/// Write every record, deleted ones included, in sequence order.
///
/// Nothing is written if any record fails `check_writable`.
pub fn write_records<W: Write>(writer: &mut W, records: &[Record]) -> io::Result<()> {
    check_writable(records)?;

    for record in records {
        writeln!(writer, "Code: {}", record.code())?;
        writeln!(writer, "Name: {}", record.name())?;
        writeln!(writer, "Price: {}", record.price())?;
        writeln!(writer, "Year: {}", record.year())?;
        if record.is_deleted() {
            writeln!(writer, "Status: {}, {}", record.status(), DELETED_MARKER)?;
        } else {
            writeln!(writer, "Status: {}", record.status())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
