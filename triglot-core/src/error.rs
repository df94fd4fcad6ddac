//! Library error type.

use std::path::{Path, PathBuf};
use thiserror::Error;
use triglot_types::SettingsError;

/// Errors raised while loading, storing or configuring profiles.
///
/// Identification itself never fails: unreadable input is logged and reported
/// as "no match".
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A table row could not be parsed. `line` is 1-based.
    #[error("{}:{line}: {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// The language code is already in the set.
    #[error("language '{code}' is already loaded")]
    DuplicateLanguage { code: String },

    /// Settings failed validation or an unknown name was given.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// The config file is not valid TOML for [`Config`](crate::Config).
    #[error("failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Wraps an I/O error with the path it happened on.
pub(crate) fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Builds a parse error for `path` at 1-based `line`.
pub(crate) fn parse(path: &Path, line: usize, reason: impl Into<String>) -> Error {
    Error::Parse {
        path: path.to_path_buf(),
        line,
        reason: reason.into(),
    }
}
