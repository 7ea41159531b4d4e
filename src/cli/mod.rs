//! CLI module for artcatalog
//!
//! Provides the command-line interface for:
//! - menu: Interactive session (default)
//! - insert / show / maintenance / display / delete: One-shot operations
//! - compact: Physical removal of deleted pieces
//! - list: Live pieces in code order

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;

pub use args::{Cli, Command, Selector, StatusArg};
pub use commands::{menu_session, open_catalog, persist, run, run_command};
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use menu::{run_menu, MenuExit};
