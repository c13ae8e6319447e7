//! Tooling & Integration Layer
//!
//! Command-line entry point for the shell binary.

pub mod cli;

pub use cli::Cli;
