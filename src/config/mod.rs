//! Layered configuration for the CLI.
//!
//! The store itself reads no configuration; the CLI loads a [`CommentsConfig`]
//! and passes the relevant values in.

pub mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::WriteMode;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl CommentsConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.display.spacing == 0 {
            return Err(ApiError::ConfigError(
                "display.spacing must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Listing layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Columns between the longest entry name and the comment column
    #[serde(default = "default_spacing")]
    pub spacing: usize,

    /// Colorize listings
    #[serde(default = "default_true")]
    pub color: bool,

    /// Sort entries by name instead of filesystem order
    #[serde(default = "default_true")]
    pub sort: bool,
}

fn default_spacing() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spacing: default_spacing(),
            color: default_true(),
            sort: default_true(),
        }
    }
}

/// Store behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `overwrite` (default) or `append`
    #[serde(default)]
    pub write_mode: WriteMode,

    /// Match paths to their on-disk casing before locating annotations
    #[serde(default)]
    pub match_case: bool,
}
