//! Environment overlay, the highest-precedence layer.
//!
//! `COMMENTS__DISPLAY__SPACING=4` sets `display.spacing`. The single-underscore
//! `COMMENTS_LOG*` variables belong to logging and are not picked up here.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};

const PREFIX: &str = "COMMENTS";
const SEPARATOR: &str = "__";

fn overlay() -> Environment {
    Environment::with_prefix(PREFIX)
        .prefix_separator(SEPARATOR)
        .separator(SEPARATOR)
        .try_parsing(true)
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(overlay()))
}
