//! Resource commands
//!
//! Parsing of `<domain> <action> <resource_type> [name] [flags]` and its
//! execution against the control plane, plus the output renderers.

pub mod domains;
pub mod handler;
pub mod output;

pub use handler::{parse_command, ApiHandler, CommandHandler, Parsed, ResourceCommand};
pub use output::OutputFormat;
