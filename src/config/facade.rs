//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::CommentsConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<CommentsConfig, ApiError> {
        let config = MergeService::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<CommentsConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}
