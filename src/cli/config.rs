//! Configuration file
//!
//! ```json
//! { "data_file": "./catalog.txt", "log_level": "warn", "compact_on_save": false }
//! ```
//!
//! Every field is optional. A missing file at the default location means
//! defaults; a missing file that was asked for explicitly is an error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Config file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./artcatalog.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog data file
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Minimum log severity: trace, info, warn or error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Compact before every save
    #[serde(default)]
    pub compact_on_save: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("./catalog.txt")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: default_log_level(),
            compact_on_save: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective configuration from CLI flags.
    pub fn resolve(config_path: Option<&Path>, data_override: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };

        if let Some(data) = data_override {
            config.data_file = data;
        }

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.data_file.as_os_str().is_empty() {
            return Err(CliError::config_error("data_file must not be empty"));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(CliError::config_error)
    }
}
