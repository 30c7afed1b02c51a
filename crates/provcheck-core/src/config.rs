//! Folder-watch settings.
//!
//! ```ini
//! [Settings]
//! watch_path = D:\Provisioning\Results
//! retry_count = 5
//! retry_delay = 2
//! ```
//!
//! Keys are matched case-insensitively, the section name is not. Backslashes
//! are taken literally.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::{Ini, ParseOption};

use crate::errors::ConfigError;

pub const SETTINGS_SECTION: &str = "Settings";
pub const DEFAULT_CONFIG_FILE: &str = "config.ini";
pub const DEFAULT_RETRY_COUNT: u32 = 5;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq)]
pub struct WatchSettings {
    pub watch_path: PathBuf,
    /// Rescans after the first search for a result file comes up empty.
    pub retry_count: u32,
    pub retry_delay: Duration,
}

impl WatchSettings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_ini_str(&text, path)
    }

    /// Parse settings from INI text. `origin` only feeds error messages.
    pub fn from_ini_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let opt = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(text, opt).map_err(|e| ConfigError::Syntax {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })?;

        let missing = || ConfigError::MissingWatchPath {
            path: origin.to_path_buf(),
        };
        let section = ini.section(Some(SETTINGS_SECTION)).ok_or_else(missing)?;
        let lookup = |key: &str| {
            section
                .iter()
                .filter(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.trim())
                .last()
        };

        let watch_path = match lookup("watch_path") {
            Some(v) if !v.is_empty() => PathBuf::from(v),
            _ => return Err(missing()),
        };

        let retry_count = match lookup("retry_count") {
            None => DEFAULT_RETRY_COUNT,
            Some(v) => v.parse::<u32>().map_err(|_| ConfigError::InvalidRetry {
                path: origin.to_path_buf(),
                key: "retry_count",
                value: v.to_string(),
            })?,
        };

        let retry_delay = match lookup("retry_delay") {
            None => DEFAULT_RETRY_DELAY,
            Some(v) => v
                .parse::<f64>()
                .ok()
                .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                .ok_or_else(|| ConfigError::InvalidRetry {
                    path: origin.to_path_buf(),
                    key: "retry_delay",
                    value: v.to_string(),
                })?,
        };

        Ok(Self {
            watch_path,
            retry_count,
            retry_delay,
        })
    }
}

/// `config.ini` beside the executable when present, else in the working directory.
pub fn default_config_path() -> PathBuf {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)));
    match beside_exe {
        Some(path) if path.is_file() => path,
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
