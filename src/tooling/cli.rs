//! CLI Tooling
//!
//! Process-level flags. Anything after the flags is a command line for the
//! shell dispatcher; with no words the binary starts the interactive shell.

use crate::config::{ConfigLoader, XcshConfig};
use crate::error::ShellError;
use crate::logging::{resolve_log_file_path, LoggingConfig};
use crate::repl::detect_color_support;
use clap::Parser;
use std::path::PathBuf;

/// xcsh - interactive shell for the Distributed Cloud control plane
#[derive(Parser, Debug)]
#[command(name = "xcsh", version)]
#[command(about = "Interactive shell for the Distributed Cloud control plane")]
pub struct Cli {
    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Control plane URL (overrides F5XC_API_URL and the config file)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Default namespace for this run
    #[arg(long)]
    pub namespace: Option<String>,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Command to run once instead of starting the shell,
    /// e.g. `load_balancer list http_loadbalancer -n prod`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl Cli {
    /// Load configuration and fold flag overrides into it.
    ///
    /// Returns the config and the file `namespace <ns>` should persist to.
    pub fn load_config(&self) -> Result<(XcshConfig, Option<PathBuf>), ShellError> {
        let (mut config, path) = match &self.config {
            Some(path) => (ConfigLoader::load_from_file(path)?, Some(path.clone())),
            None => (
                ConfigLoader::load()?,
                ConfigLoader::global_config_path().ok(),
            ),
        };
        if let Some(url) = &self.api_url {
            config.api_url = Some(url.clone());
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        config.logging = self.logging_config(&config.logging);
        Ok((config, path))
    }

    /// Logging settings with flags applied over `base`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if self.verbose {
            logging.enabled = true;
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        // An unresolvable path is reported when logging starts
        if logging.output.contains("file") || logging.output == "both" {
            if let Ok(path) = resolve_log_file_path(self.log_file.clone(), logging.file.clone()) {
                logging.file = Some(path);
            }
        }
        if self.no_color {
            logging.color = false;
        }
        logging
    }

    pub fn color_enabled(&self) -> bool {
        !self.no_color && detect_color_support()
    }
}
