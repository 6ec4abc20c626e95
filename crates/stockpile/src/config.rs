//! # Configuration
//!
//! Stockpile configuration is managed by [`confique`]: an optional
//! `stockpile.toml` in the host's config directory, layered over compiled
//! defaults. Nothing is read from environment variables.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `Data/Products.json` | Product data file; relative paths resolve against the data directory |
//! | `key_case` | `as_is` | Key casing written to JSON (`as_is`, `pascal_case`, `camel_case`) |
//! | `pretty` | `true` | Indent written JSON |
//! | `on_corrupt` | `treat_as_empty` | What to do with an undecodable data file (`treat_as_empty`, `fail`) |
//! | `log_level` | `info` | Filter directive for [`crate::logging::init_logging`] |
//!
//! ## Data Directory
//!
//! Hosts usually pass their own base directory. When they don't,
//! [`default_data_dir`] picks the OS data directory via the `directories` crate.

use crate::error::{Result, StockpileError};
use crate::serializer::KeyCase;
use crate::store::CorruptDataPolicy;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "stockpile.toml";

const DEFAULT_DATA_FILE: &str = "Data/Products.json";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for stockpile, stored in `stockpile.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StockpileConfig {
    /// Product data file. Relative paths resolve against the data directory.
    #[config(default = "Data/Products.json")]
    pub data_file: PathBuf,

    /// Key casing for written JSON: "as_is", "pascal_case" or "camel_case".
    /// When absent, keys are written as the entity names them.
    pub key_case: Option<KeyCase>,

    /// Indent written JSON.
    #[config(default = true)]
    pub pretty: bool,

    /// Handling of an undecodable data file: "treat_as_empty" or "fail".
    /// When absent, corrupt files read as empty.
    pub on_corrupt: Option<CorruptDataPolicy>,

    /// Log filter directive, e.g. "debug" or "stockpile=trace".
    #[config(default = "info")]
    pub log_level: String,
}

impl Default for StockpileConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            key_case: None,
            pretty: true,
            on_corrupt: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl StockpileConfig {
    /// Load `stockpile.toml` from `config_dir`, or defaults if there is none.
    pub fn load(config_dir: impl AsRef<Path>) -> Result<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        let config = Self::builder().file(path).load()?;
        Ok(config)
    }

    /// A commented sample `stockpile.toml`.
    pub fn template() -> String {
        confique::toml::template::<Self>(confique::toml::FormatOptions::default())
    }

    pub fn key_case(&self) -> KeyCase {
        self.key_case.unwrap_or_default()
    }

    pub fn on_corrupt(&self) -> CorruptDataPolicy {
        self.on_corrupt.unwrap_or_default()
    }

    /// The data file, resolved against `data_dir` when relative.
    pub fn resolve_data_file(&self, data_dir: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            data_dir.join(&self.data_file)
        }
    }

    /// The data file, resolved against the OS data directory when relative.
    pub fn data_file_path(&self) -> Result<PathBuf> {
        if self.data_file.is_absolute() {
            return Ok(self.data_file.clone());
        }
        let data_dir = default_data_dir().ok_or_else(|| {
            StockpileError::Config("Could not determine a data directory".to_string())
        })?;
        Ok(self.resolve_data_file(&data_dir))
    }
}

/// OS-appropriate data directory for stockpile, if the platform has one.
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "stockpile", "stockpile").map(|dirs| dirs.data_dir().to_path_buf())
}
