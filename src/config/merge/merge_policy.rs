//! Built-in defaults, the lowest-precedence layer.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("display.spacing", 2)?
        .set_default("display.color", true)?
        .set_default("display.sort", true)?
        .set_default("store.write_mode", "overwrite")?
        .set_default("store.match_case", false)?
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
