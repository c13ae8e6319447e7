//! Merge policy and orchestration for configuration sources.

pub mod service;

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

/// Builder seeded with the defaults that must exist before any source is layered.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("namespace", super::DEFAULT_NAMESPACE)?
        .set_default("completion.ttl_ms", 3000_i64)?
        .set_default("completion.fetch_timeout_ms", 3000_i64)
}
