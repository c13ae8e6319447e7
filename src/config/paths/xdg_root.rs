//! XDG Base Directory utilities for config and history locations.

use crate::error::ShellError;
use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf, ShellError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ShellError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Global config file: `$XDG_CONFIG_HOME/xcsh/config.toml`
pub fn global_config_path() -> Result<PathBuf, ShellError> {
    Ok(config_home()?.join("xcsh").join("config.toml"))
}

/// Default history file: `$HOME/.xcsh_history`, or `.xcsh_history` in the
/// working directory when HOME is unavailable.
pub fn default_history_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join(".xcsh_history"),
        _ => PathBuf::from(".xcsh_history"),
    }
}
