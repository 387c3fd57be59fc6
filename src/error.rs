//! Error types for annotation storage and the command layer.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the annotation store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Target does not exist, or has the wrong kind for the operation.
    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// A filesystem call failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        StoreError::InvalidPath {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// True when the error means the caller pointed at something that is not there.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, StoreError::InvalidPath { .. })
    }
}

/// Errors surfaced to the CLI.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPath(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
