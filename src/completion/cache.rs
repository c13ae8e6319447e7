//! TTL cache for remote completion candidates
//!
//! Two kinds of entries: the global namespace list, and resource instance
//! names keyed by `(domain, resource_type)`. Each entry expires on its own.
//! A resource entry also remembers the namespace it was fetched for; asking
//! for another namespace is a miss and replaces the entry.
//!
//! Lookups are synchronous because the line editor calls completers
//! synchronously. A miss spawns the fetch on the shared tokio runtime and
//! waits at most `fetch_timeout` for it. A fetch that outlives the wait keeps
//! running and fills the entry when it lands, so the next keystroke benefits.
//! Failures are never stored: the caller gets an empty list and the next call
//! fetches again.

use super::clock::{Clock, SystemClock};
use super::source::CompletionSource;
use crate::config::CompletionConfig;
use crate::error::ShellError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::debug;

/// Cache timing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub ttl: Duration,
    pub fetch_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3),
            fetch_timeout: Duration::from_secs(3),
        }
    }
}

impl From<&CompletionConfig> for CacheSettings {
    fn from(config: &CompletionConfig) -> Self {
        Self {
            ttl: config.ttl(),
            fetch_timeout: config.fetch_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CacheKey {
    Namespaces,
    Resources {
        domain: String,
        resource_type: String,
    },
}

#[derive(Debug, Clone)]
struct CacheEntry {
    items: Vec<String>,
    fetched_at: Instant,
    /// Namespace the items belong to; None for the namespace list
    namespace: Option<String>,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }

    fn serves(&self, namespace: Option<&str>) -> bool {
        self.namespace.as_deref() == namespace
    }
}

/// All cache maps live behind this one lock.
#[derive(Debug, Default)]
struct CacheState {
    namespaces: Option<CacheEntry>,
    resources: HashMap<(String, String), CacheEntry>,
}

impl CacheState {
    fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        match key {
            CacheKey::Namespaces => self.namespaces.as_ref(),
            CacheKey::Resources {
                domain,
                resource_type,
            } => self
                .resources
                .get(&(domain.clone(), resource_type.clone())),
        }
    }

    fn store(&mut self, key: CacheKey, entry: CacheEntry) {
        match key {
            CacheKey::Namespaces => self.namespaces = Some(entry),
            CacheKey::Resources {
                domain,
                resource_type,
            } => {
                self.resources.insert((domain, resource_type), entry);
            }
        }
    }
}

/// Process-wide completion cache.
pub struct CompletionCache {
    source: Arc<dyn CompletionSource>,
    state: Arc<Mutex<CacheState>>,
    clock: Arc<dyn Clock>,
    runtime: Handle,
    settings: CacheSettings,
}

impl CompletionCache {
    /// Create a cache that fetches through `source` on `runtime`.
    ///
    /// `runtime` must belong to a multi-threaded tokio runtime, and lookups must
    /// not be made from inside that runtime.
    pub fn new(source: Arc<dyn CompletionSource>, runtime: Handle, settings: CacheSettings) -> Self {
        Self::with_clock(source, runtime, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn CompletionSource>,
        runtime: Handle,
        settings: CacheSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState::default())),
            clock,
            runtime,
            settings,
        }
    }

    /// Namespace names, served from cache while fresh.
    pub fn namespaces(&self) -> Vec<String> {
        let source = Arc::clone(&self.source);
        let timeout = self.settings.fetch_timeout;
        self.lookup(CacheKey::Namespaces, None, async move {
            source.fetch_namespaces(timeout).await
        })
    }

    /// Instance names of `resource_type` in `domain`, served from cache while fresh.
    ///
    /// Entries are keyed by domain and type; a fresh entry fetched for a
    /// different namespace counts as a miss.
    pub fn resources(&self, domain: &str, resource_type: &str, namespace: &str) -> Vec<String> {
        let key = CacheKey::Resources {
            domain: domain.to_string(),
            resource_type: resource_type.to_string(),
        };
        let source = Arc::clone(&self.source);
        let timeout = self.settings.fetch_timeout;
        let (domain, resource_type, owned_namespace) = (
            domain.to_string(),
            resource_type.to_string(),
            namespace.to_string(),
        );
        self.lookup(key, Some(namespace), async move {
            source
                .fetch_resource_instances(&domain, &resource_type, &owned_namespace, timeout)
                .await
        })
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        *state = CacheState::default();
    }

    fn cached(&self, key: &CacheKey, namespace: Option<&str>) -> Option<Vec<String>> {
        let now = self.clock.now();
        let state = self.state.lock();
        state
            .get(key)
            .filter(|entry| entry.is_fresh(now, self.settings.ttl) && entry.serves(namespace))
            .map(|entry| entry.items.clone())
    }

    fn lookup<F>(&self, key: CacheKey, namespace: Option<&str>, fetch: F) -> Vec<String>
    where
        F: Future<Output = Result<Vec<String>, ShellError>> + Send + 'static,
    {
        if let Some(items) = self.cached(&key, namespace) {
            debug!(?key, "completion cache hit");
            return items;
        }
        debug!(?key, "completion cache miss");

        // The lock is only taken after the fetch resolves, never across it
        let state = Arc::clone(&self.state);
        let clock = Arc::clone(&self.clock);
        let store_key = key.clone();
        let store_namespace = namespace.map(str::to_string);
        let task = self.runtime.spawn(async move {
            let items = fetch.await?;
            state.lock().store(
                store_key,
                CacheEntry {
                    items: items.clone(),
                    fetched_at: clock.now(),
                    namespace: store_namespace,
                },
            );
            Ok::<_, ShellError>(items)
        });

        let timeout = self.settings.fetch_timeout;
        match self
            .runtime
            .block_on(async move { tokio::time::timeout(timeout, task).await })
        {
            Ok(Ok(Ok(items))) => items,
            Ok(Ok(Err(e))) => {
                debug!(?key, error = %e, "completion fetch failed");
                Vec::new()
            }
            Ok(Err(join_error)) => {
                debug!(?key, error = %join_error, "completion fetch task aborted");
                Vec::new()
            }
            Err(_) => {
                let err = ShellError::Timeout(timeout.as_millis() as u64);
                debug!(?key, error = %err, "completion fetch abandoned");
                Vec::new()
            }
        }
    }
}
