//! xcsh: Interactive Shell for a Multi-Domain Cloud API
//!
//! A context-navigating shell over a control plane organised as domains,
//! actions and resource types. Tab completion is backed by a short-lived
//! cache so keystrokes never wait on the network for long.

pub mod catalog;
pub mod client;
pub mod commands;
pub mod completion;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod repl;
pub mod tooling;
