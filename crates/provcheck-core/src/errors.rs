//! Error types for the provisioning checks.
//!
//! A `RecordError` costs one folder. A `ConfigError` stops the watch service
//! before it starts.

use std::path::PathBuf;

/// A result file could not be turned into a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Open, read or decode failure. No partial record is produced.
    #[error("failed to read result file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl RecordError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileAccess { path, .. } => path,
        }
    }
}

/// Batch discovery failures.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid directory: {}", path.display())]
    InvalidRoot { path: PathBuf },

    #[error(
        "No matching folders found in {} (looking for {pattern}).",
        root.display()
    )]
    NoMatchingFolders { root: PathBuf, pattern: String },

    #[error("failed to list {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid folder pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Watch-service configuration failures. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid INI format in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    #[error("'watch_path' not specified in [Settings] section of {}", path.display())]
    MissingWatchPath { path: PathBuf },

    #[error("Invalid {key} in {}: {value:?}", path.display())]
    InvalidRetry {
        path: PathBuf,
        key: &'static str,
        value: String,
    },
}

/// The filesystem subscription could not be established.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("failed to watch {}: {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to spawn folder worker: {0}")]
    Worker(#[from] std::io::Error),
}
