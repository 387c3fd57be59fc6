//! Global config file source: `$XDG_CONFIG_HOME/comments/config.toml`, optional.

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::config_file() {
        Some(path) => {
            tracing::debug!("Loading global config from {}", path.display());
            Ok(builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            ))
        }
        None => Ok(builder),
    }
}
