//! CLI argument definitions using clap
//!
//! Commands:
//! - artcatalog [menu]
//! - artcatalog insert --code <c> --name <n> --price <p> [--year <y>] --status <s>
//! - artcatalog show|maintenance|display|delete (--code <c> | --name <n>)
//! - artcatalog compact
//! - artcatalog list

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::{Lookup, Status};

/// artcatalog - art piece catalog indexed by code and by name
#[derive(Parser, Debug)]
#[command(name = "artcatalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog data file (overrides the configuration)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Register a new piece
    Insert {
        #[arg(long)]
        code: String,

        #[arg(long)]
        name: String,

        /// Positive price; ',' or '.' as decimal separator
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "")]
        year: String,

        #[arg(long, value_enum)]
        status: StatusArg,
    },

    /// Show a registered piece
    Show {
        #[command(flatten)]
        target: Selector,
    },

    /// Put a piece in maintenance
    Maintenance {
        #[command(flatten)]
        target: Selector,
    },

    /// Put a piece on display
    Display {
        #[command(flatten)]
        target: Selector,
    },

    /// Logically delete a piece
    Delete {
        #[command(flatten)]
        target: Selector,
    },

    /// Physically remove deleted pieces
    Compact,

    /// List registered pieces in code order
    List,
}

/// Exactly one of `--code` / `--name`
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct Selector {
    #[arg(long)]
    pub code: Option<String>,

    #[arg(long)]
    pub name: Option<String>,
}

impl Selector {
    /// Uppercased lookup key; `None` only if clap's group check was bypassed
    pub fn to_lookup(&self) -> Option<Lookup> {
        match (&self.code, &self.name) {
            (Some(code), _) => Some(Lookup::code(code.trim().to_uppercase())),
            (None, Some(name)) => Some(Lookup::name(name.trim().to_uppercase())),
            (None, None) => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusArg {
    Maintenance,
    Display,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Maintenance => Status::InMaintenance,
            StatusArg::Display => Status::OnDisplay,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
