//! Interactive menu loop
//!
//! Numbered options 1-7; every by-key action asks whether to search by code
//! or by name. Lookup input is uppercased before it reaches the catalog.
//! End of input behaves like "save and exit".

use std::io::{BufRead, Write};

use crate::catalog::{Lookup, NewRecord, RecordStore};
use crate::validation::{
    validate_code, validate_name, validate_price, validate_status_choice, validate_year,
    ValidationError,
};

use super::commands::register;
use super::errors::CliResult;
use super::io::{prompt, render_catalog_error, render_record};

const MENU: &str = "\n1. Insert a piece\n\
                    2. Show a piece\n\
                    3. Put in maintenance\n\
                    4. Put on display\n\
                    5. Delete a piece\n\
                    6. Compact\n\
                    7. Save and exit\n\n\
                    Please enter your option: ";

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuExit {
    /// Option 7
    Requested,
    /// Input stream closed
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Show,
    Maintenance,
    Display,
    Delete,
}

impl Action {
    fn purpose(&self) -> &'static str {
        match self {
            Action::Show => "find the piece",
            Action::Maintenance => "put the piece in maintenance",
            Action::Display => "put the piece on display",
            Action::Delete => "delete the piece",
        }
    }
}

enum Selection {
    Found(Lookup),
    Invalid,
    EndOfInput,
}

/// Run the menu until option 7 or end of input. The caller saves.
pub fn run_menu<R: BufRead, W: Write>(
    store: &mut RecordStore,
    input: &mut R,
    out: &mut W,
) -> CliResult<MenuExit> {
    writeln!(out, "Art Catalog Management")?;

    loop {
        let Some(option) = prompt(input, out, MENU)? else {
            return Ok(MenuExit::EndOfInput);
        };

        let action = match option.trim() {
            "1" => {
                if !insert_piece(store, input, out)? {
                    return Ok(MenuExit::EndOfInput);
                }
                continue;
            }
            "2" => Action::Show,
            "3" => Action::Maintenance,
            "4" => Action::Display,
            "5" => Action::Delete,
            "6" => {
                let report = store.compact();
                writeln!(
                    out,
                    "Deleted pieces were permanently removed ({}).",
                    report.removed
                )?;
                continue;
            }
            "7" => return Ok(MenuExit::Requested),
            _ => {
                writeln!(out, "Invalid option")?;
                continue;
            }
        };

        match select(input, out, action)? {
            Selection::Found(lookup) => apply(store, action, &lookup, out)?,
            Selection::Invalid => writeln!(out, "Invalid option")?,
            Selection::EndOfInput => return Ok(MenuExit::EndOfInput),
        }
    }
}

fn select<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    action: Action,
) -> CliResult<Selection> {
    let label = format!(
        "\nSelect how to {}:\n1. By code\n2. By name\n\nOption: ",
        action.purpose()
    );
    let Some(choice) = prompt(input, out, &label)? else {
        return Ok(Selection::EndOfInput);
    };

    let (label, by_code) = match choice.trim() {
        "1" => ("Enter the code: ", true),
        "2" => ("Enter the name: ", false),
        _ => return Ok(Selection::Invalid),
    };

    let Some(key) = prompt(input, out, label)? else {
        return Ok(Selection::EndOfInput);
    };
    let key = key.trim().to_uppercase();

    Ok(Selection::Found(if by_code {
        Lookup::Code(key)
    } else {
        Lookup::Name(key)
    }))
}

fn apply<W: Write>(
    store: &mut RecordStore,
    action: Action,
    lookup: &Lookup,
    out: &mut W,
) -> CliResult<()> {
    let result = match action {
        Action::Show => match store.find(lookup) {
            Ok(record) => {
                writeln!(out, "\nThe registered piece is:\n{}", render_record(record))?;
                return Ok(());
            }
            Err(e) => Err(e),
        },
        Action::Maintenance => store
            .set_maintenance(lookup)
            .map(|_| "The piece was put in maintenance."),
        Action::Display => store
            .set_display(lookup)
            .map(|_| "The piece was put on display."),
        Action::Delete => store.soft_delete(lookup).map(|_| "The piece was deleted."),
    };

    match result {
        Ok(message) => writeln!(out, "{}", message)?,
        Err(e) => writeln!(out, "{}", render_catalog_error(&e))?,
    }
    Ok(())
}

/// Prompt for every field until it validates, then register the piece.
/// Returns `false` if input ended first.
fn insert_piece<R: BufRead, W: Write>(
    store: &mut RecordStore,
    input: &mut R,
    out: &mut W,
) -> CliResult<bool> {
    writeln!(out, "\nEnter the details of the piece:")?;

    let Some(code) = read_valid(input, out, "Code: ", |raw| validate_code(raw, store))? else {
        return Ok(false);
    };
    let Some(name) = read_valid(input, out, "Name: ", |raw| validate_name(raw, store))? else {
        return Ok(false);
    };
    let Some(price) = read_valid(input, out, "Price: ", validate_price)? else {
        return Ok(false);
    };
    let Some(year) = read_valid(input, out, "Year: ", validate_year)? else {
        return Ok(false);
    };
    let Some(status) = read_valid(
        input,
        out,
        "Status (enter '1' for IN MAINTENANCE or '2' for ON DISPLAY): ",
        validate_status_choice,
    )?
    else {
        return Ok(false);
    };

    match register(store, NewRecord::new(code, name, price, year, status)) {
        Ok(_) => writeln!(out, "The piece was registered successfully!")?,
        Err(e) => writeln!(out, "{}", render_catalog_error(&e))?,
    }
    Ok(true)
}

fn read_valid<R, W, T, F>(
    input: &mut R,
    out: &mut W,
    label: &str,
    check: F,
) -> CliResult<Option<T>>
where
    R: BufRead,
    W: Write,
    F: Fn(&str) -> Result<T, ValidationError>,
{
    loop {
        let Some(raw) = prompt(input, out, label)? else {
            return Ok(None);
        };
        match check(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => writeln!(out, "ERROR: {}", e)?,
        }
    }
}
