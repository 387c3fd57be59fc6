//! XDG Base Directory utilities for the global config file.

use std::path::PathBuf;

const APP_DIR: &str = "comments";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Get the global config file path
///
/// Returns `$XDG_CONFIG_HOME/comments/config.toml`. The file need not exist.
pub fn config_file() -> Option<PathBuf> {
    config_home().map(|home| home.join(APP_DIR).join("config.toml"))
}
