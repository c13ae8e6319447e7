//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::paths::xdg_root;
use super::XcshConfig;
use crate::error::ShellError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment.
    pub fn load() -> Result<XcshConfig, ShellError> {
        Ok(MergeService::load()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<XcshConfig, ShellError> {
        if !path.exists() {
            return Err(ShellError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }

    /// Create default configuration.
    pub fn default() -> XcshConfig {
        XcshConfig::default()
    }

    /// Global config file path (`$XDG_CONFIG_HOME/xcsh/config.toml`).
    pub fn global_config_path() -> Result<PathBuf, ShellError> {
        xdg_root::global_config_path()
    }

    /// Persist `namespace` as the default in a config file.
    ///
    /// Other keys in the file are preserved.
    pub fn save_default_namespace(path: &Path, namespace: &str) -> Result<(), ShellError> {
        let mut table = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                ShellError::ConfigError(format!(
                    "Failed to read config file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            content.parse::<toml::Table>().map_err(|e| {
                ShellError::ConfigError(format!(
                    "Failed to parse config file {}: {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            toml::Table::new()
        };

        table.insert(
            "namespace".to_string(),
            toml::Value::String(namespace.to_string()),
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ShellError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        let rendered = toml::to_string_pretty(&table)
            .map_err(|e| ShellError::SerializationError(e.to_string()))?;
        std::fs::write(path, rendered).map_err(|e| {
            ShellError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })
    }
}
