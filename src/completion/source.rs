//! Remote fetch contract consumed by the completion cache.

use crate::error::ShellError;
use async_trait::async_trait;
use std::time::Duration;

/// Where completion candidates come from.
///
/// `timeout` is the caller's budget; implementations may use it to bound
/// their own request, but the cache enforces it regardless.
#[async_trait]
pub trait CompletionSource: Send + Sync {
    async fn fetch_namespaces(&self, timeout: Duration) -> Result<Vec<String>, ShellError>;

    async fn fetch_resource_instances(
        &self,
        domain: &str,
        resource_type: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Vec<String>, ShellError>;
}

/// Source used when no API endpoint is configured; every fetch fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredSource;

#[async_trait]
impl CompletionSource for UnconfiguredSource {
    async fn fetch_namespaces(&self, _timeout: Duration) -> Result<Vec<String>, ShellError> {
        Err(ShellError::NotConfigured)
    }

    async fn fetch_resource_instances(
        &self,
        _domain: &str,
        _resource_type: &str,
        _namespace: &str,
        _timeout: Duration,
    ) -> Result<Vec<String>, ShellError> {
        Err(ShellError::NotConfigured)
    }
}
