//! Configuration
//!
//! Layered configuration: built-in defaults, the global config file, then
//! `F5XC_*` environment variables. See [`facade::ConfigLoader`].

pub mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Namespace used when neither config nor environment names one.
pub const DEFAULT_NAMESPACE: &str = "default";

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_ttl_ms() -> u64 {
    3000
}

fn default_fetch_timeout_ms() -> u64 {
    3000
}

fn default_max_entries() -> usize {
    1000
}

/// Top-level shell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XcshConfig {
    /// Control plane base URL, e.g. `https://acme.console.ves.volterra.io`
    #[serde(default)]
    pub api_url: Option<String>,

    /// API token sent as `Authorization: APIToken <token>`
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,

    /// Default namespace injected into commands
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for XcshConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            namespace: default_namespace(),
            completion: CompletionConfig::default(),
            history: HistoryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Completion cache tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Freshness window for cached candidates
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,

    /// Upper bound on a single completion fetch
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl CompletionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

/// Command history persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// History file; None means `~/.xcsh_history`
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: default_max_entries(),
        }
    }
}
