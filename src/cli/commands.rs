//! CLI command implementations
//!
//! Every command follows the same session lifecycle:
//! 1. Configuration load
//! 2. Catalog load (missing file = empty catalog)
//! 3. Operation
//! 4. Save (mutating commands only)

use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::catalog::{CatalogResult, Lookup, NewRecord, RecordStore};
use crate::index::Locator;
use crate::observability::{Event, Logger};
use crate::persistence::{load_all, save_all, StoredEntry};
use crate::validation::{validate_code, validate_name, validate_price, validate_year};

use super::args::{Cli, Command, Selector, StatusArg};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{render_catalog_error, render_record, render_summary};
use super::menu::run_menu;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = Config::resolve(cli.config.as_deref(), cli.data)?;
    Logger::set_min_severity(config.severity()?);
    Logger::info(
        Event::ConfigLoaded.as_str(),
        &[
            ("compact_on_save", if config.compact_on_save { "true" } else { "false" }),
            ("data_file", &config.data_file.display().to_string()),
        ],
    );

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => menu(&config),
        Command::Insert {
            code,
            name,
            price,
            year,
            status,
        } => insert(&config, &code, &name, &price, &year, status),
        Command::Show { target } => show(&config, &target),
        Command::Maintenance { target } => change(
            &config,
            &target,
            RecordStore::set_maintenance,
            "The piece was put in maintenance.",
        ),
        Command::Display { target } => {
            change(&config, &target, RecordStore::set_display, "The piece was put on display.")
        }
        Command::Delete { target } => {
            change(&config, &target, RecordStore::soft_delete, "The piece was deleted.")
        }
        Command::Compact => compact(&config),
        Command::List => list(&config),
    }
}

/// Load the catalog file into a fresh store.
pub fn open_catalog(path: &Path) -> CliResult<RecordStore> {
    let entries = match load_all(path) {
        Ok(entries) => entries,
        Err(e) if e.is_not_found() => {
            Logger::warn(
                Event::CatalogLoadMissing.as_str(),
                &[("path", &path.display().to_string())],
            );
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    let store = RecordStore::restore(entries.into_iter().map(StoredEntry::into_parts))?;
    store.verify_consistency()?;
    Ok(store)
}

/// Write the store back, compacting first if configured.
pub fn persist(config: &Config, store: &mut RecordStore) -> CliResult<()> {
    if config.compact_on_save {
        store.compact();
    }
    save_all(&config.data_file, store)?;
    Ok(())
}

/// Insert and log. Shared by the menu and the `insert` command.
pub(crate) fn register(store: &mut RecordStore, new: NewRecord) -> CatalogResult<Locator> {
    let code = new.code.clone();
    let name = new.name.clone();
    let locator = store.insert(new)?;
    Logger::info(
        Event::RecordInserted.as_str(),
        &[
            ("code", &code),
            ("locator", &locator.to_string()),
            ("name", &name),
        ],
    );
    Ok(locator)
}

/// Interactive session on stdin / stdout
pub fn menu(config: &Config) -> CliResult<()> {
    let stdin = io::stdin();
    menu_session(config, &mut stdin.lock(), &mut io::stdout())
}

/// Load, run the menu over `input`, save.
pub fn menu_session<R: BufRead, W: Write>(
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let mut store = open_catalog(&config.data_file)?;

    run_menu(&mut store, input, out)?;

    persist(config, &mut store)?;
    writeln!(out, "The catalog has been saved to disk.")?;
    Ok(())
}

pub fn insert(
    config: &Config,
    code: &str,
    name: &str,
    price: &str,
    year: &str,
    status: StatusArg,
) -> CliResult<()> {
    let mut store = open_catalog(&config.data_file)?;

    let code = validate_code(code, &store)?;
    let name = validate_name(name, &store)?;
    let price = validate_price(price)?;
    let year = validate_year(year)?;

    register(&mut store, NewRecord::new(code, name, price, year, status.into()))?;
    persist(config, &mut store)?;

    println!("The piece was registered successfully!");
    Ok(())
}

pub fn show(config: &Config, target: &Selector) -> CliResult<()> {
    let store = open_catalog(&config.data_file)?;
    let record = store.find(&lookup_of(target)?)?;
    println!("{}", render_record(record));
    Ok(())
}

/// Status change or soft delete, then save.
///
/// A no-op transition is reported and skips the save.
fn change(
    config: &Config,
    target: &Selector,
    op: fn(&mut RecordStore, &Lookup) -> CatalogResult<()>,
    success: &str,
) -> CliResult<()> {
    let mut store = open_catalog(&config.data_file)?;
    let lookup = lookup_of(target)?;

    match op(&mut store, &lookup) {
        Ok(()) => {
            persist(config, &mut store)?;
            println!("{}", success);
            Ok(())
        }
        Err(e) if e.is_informational() => {
            println!("{}", render_catalog_error(&e));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn compact(config: &Config) -> CliResult<()> {
    let mut store = open_catalog(&config.data_file)?;
    let report = store.compact();
    store.verify_consistency()?;
    save_all(&config.data_file, &store)?;

    println!(
        "Deleted pieces were permanently removed ({} removed, {} remaining).",
        report.removed, report.remaining
    );
    Ok(())
}

/// Live pieces in ascending code order
pub fn list(config: &Config) -> CliResult<()> {
    let store = open_catalog(&config.data_file)?;

    for code in store.code_keys() {
        if let Ok(record) = store.find_by_code(code) {
            println!("{}", render_summary(record));
        }
    }
    Ok(())
}

fn lookup_of(target: &Selector) -> CliResult<Lookup> {
    target
        .to_lookup()
        .ok_or_else(|| CliError::usage_error("either --code or --name is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Status;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        Config {
            data_file: dir.path().join("catalog.txt"),
            ..Config::default()
        }
    }

    fn by_code(code: &str) -> Selector {
        Selector {
            code: Some(code.to_string()),
            name: None,
        }
    }

    #[test]
    fn test_missing_catalog_opens_empty() {
        let temp = TempDir::new().unwrap();
        let store = open_catalog(&temp.path().join("none.txt")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.txt");
        fs::write(&path, "Code: A\nName: B\nPrice: x\nYear: 1\nStatus: ON DISPLAY\n").unwrap();

        let err = open_catalog(&path).unwrap_err();
        assert_eq!(err.code_str(), "CLI_PERSISTENCE_ERROR");
    }

    #[test]
    fn test_insert_then_delete_then_compact() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        insert(&config, "aaaa1111", "alpha", "10", "1900", StatusArg::Display).unwrap();
        insert(&config, "bbbb2222", "beta", "20", "", StatusArg::Maintenance).unwrap();

        change(&config, &by_code("AAAA1111"), RecordStore::soft_delete, "").unwrap();
        let store = open_catalog(&config.data_file).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.find_by_code("AAAA1111").is_err());

        compact(&config).unwrap();
        let store = open_catalog(&config.data_file).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_name("BETA").unwrap().status(), Status::InMaintenance);
    }

    #[test]
    fn test_insert_rejects_duplicate_code() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        insert(&config, "AAAA1111", "ALPHA", "10", "", StatusArg::Display).unwrap();
        let err = insert(&config, "aaaa1111", "OTHER", "10", "", StatusArg::Display).unwrap_err();
        assert_eq!(err.code_str(), "CLI_INVALID_INPUT");
    }

    #[test]
    fn test_noop_transition_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        insert(&config, "AAAA1111", "ALPHA", "10", "", StatusArg::Display).unwrap();
        change(&config, &by_code("AAAA1111"), RecordStore::set_display, "").unwrap();
    }

    #[test]
    fn test_change_on_missing_piece_fails() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        let err = change(&config, &by_code("ZZZZ9999"), RecordStore::set_maintenance, "")
            .unwrap_err();
        assert_eq!(err.code_str(), "CLI_CATALOG_ERROR");
    }

    #[test]
    fn test_insert_rejects_line_breaks() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);

        let err = insert(&config, "aaaa1111", "a\nb", "10", "1900", StatusArg::Display)
            .unwrap_err();
        assert_eq!(err.code_str(), "CLI_INVALID_INPUT");

        let err = insert(&config, "aaaa1111", "alpha", "10", "19\n00", StatusArg::Display)
            .unwrap_err();
        assert_eq!(err.code_str(), "CLI_INVALID_INPUT");

        assert!(!config.data_file.exists());
        insert(&config, "aaaa1111", "alpha", "10", "1900", StatusArg::Display).unwrap();
        assert_eq!(open_catalog(&config.data_file).unwrap().len(), 1);
    }

    #[test]
    fn test_menu_session_writes_catalog() {
        let temp = TempDir::new().unwrap();
        let config = config_for(&temp);
        insert(&config, "BBBB2222", "BETA", "20", "1700", StatusArg::Display).unwrap();

        let script = "1\nabcd1234\nmona\n10,5\n1503\n2\n\
                      2\n1\nabcd1234\n\
                      3\n1\nabcd1234\n\
                      5\n2\nbeta\n\
                      6\n\
                      7\n";
        let mut out = Vec::new();
        menu_session(&config, &mut script.as_bytes(), &mut out).unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("The registered piece is:\nCode: ABCD1234"));
        assert!(output.ends_with("The catalog has been saved to disk.\n"));

        let content = fs::read_to_string(&config.data_file).unwrap();
        assert_eq!(
            content,
            "Code: ABCD1234\nName: MONA\nPrice: 10.5\nYear: 1503\nStatus: IN MAINTENANCE\n\n"
        );
    }

    #[test]
    fn test_compact_on_save() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            compact_on_save: true,
            ..config_for(&temp)
        };

        insert(&config, "AAAA1111", "ALPHA", "10", "", StatusArg::Display).unwrap();
        change(&config, &by_code("AAAA1111"), RecordStore::soft_delete, "").unwrap();

        let content = fs::read_to_string(&config.data_file).unwrap();
        assert!(content.is_empty());
    }
}
