//! MergeService: orchestrates sources and deserializes to CommentsConfig.

use crate::config::sources::{environment, global_file};
use crate::config::CommentsConfig;
use config::{ConfigError, File, FileFormat};
use std::path::Path;

use super::merge_policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<CommentsConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Like [`MergeService::load`] with `path` standing in for the global file.
    /// The file must exist.
    pub fn load_from_file(path: &Path) -> Result<CommentsConfig, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }
}
