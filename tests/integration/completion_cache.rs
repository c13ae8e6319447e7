use crate::integration::support::FakeSource;
use std::sync::Arc;
use std::time::{Duration, Instant};
use xcsh::completion::providers::{namespaces, ResourceNameCompleter};
use xcsh::completion::{CacheSettings, CompletionCache, ManualClock};

fn cache_over(
    source: Arc<FakeSource>,
    fetch_timeout: Duration,
) -> (tokio::runtime::Runtime, Arc<ManualClock>, CompletionCache) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let clock = Arc::new(ManualClock::new());
    let cache = CompletionCache::with_clock(
        source,
        runtime.handle().clone(),
        CacheSettings {
            ttl: Duration::from_secs(3),
            fetch_timeout,
        },
        clock.clone(),
    );
    (runtime, clock, cache)
}

#[test]
fn slow_fetch_returns_empty_within_budget() {
    let source = Arc::new(FakeSource::slow(&["prod"], Duration::from_millis(800)));
    let (_rt, _clock, cache) = cache_over(source.clone(), Duration::from_millis(100));

    let started = Instant::now();
    assert!(cache.namespaces().is_empty());
    assert!(started.elapsed() < Duration::from_millis(700));
}

#[test]
fn late_result_populates_cache() {
    let source = Arc::new(FakeSource::slow(&["prod"], Duration::from_millis(150)));
    let (_rt, _clock, cache) = cache_over(source.clone(), Duration::from_millis(20));

    assert!(cache.namespaces().is_empty());
    std::thread::sleep(Duration::from_millis(500));
    assert_eq!(cache.namespaces(), vec!["prod"]);
    assert_eq!(source.namespace_calls(), 1);
}

#[test]
fn resource_names_follow_ttl() {
    let source = Arc::new(FakeSource::new(&["prod"]));
    let (_rt, clock, cache) = cache_over(source.clone(), Duration::from_secs(1));
    let completer = ResourceNameCompleter::new("cdn", "certificate");

    let first = completer.complete(&cache, None, "prod", "");
    assert_eq!(first.texts(), vec!["prod-certificate-a", "prod-certificate-b"]);
    clock.advance(Duration::from_secs(2));
    completer.complete(&cache, None, "prod", "prod-certificate-b");
    assert_eq!(source.resource_calls(), 1);

    clock.advance(Duration::from_secs(1));
    let filtered = completer.complete(&cache, None, "prod", "prod-certificate-b");
    assert_eq!(filtered.texts(), vec!["prod-certificate-b"]);
    assert_eq!(source.resource_calls(), 2);
}

#[test]
fn namespace_provider_falls_back_when_list_is_empty() {
    let source = Arc::new(FakeSource::new(&[]));
    let (_rt, _clock, cache) = cache_over(source, Duration::from_secs(1));
    assert_eq!(namespaces(&cache, "").texts(), vec!["default", "system"]);
}

#[test]
fn clear_forces_refetch() {
    let source = Arc::new(FakeSource::new(&["prod"]));
    let (_rt, _clock, cache) = cache_over(source.clone(), Duration::from_secs(1));
    cache.namespaces();
    cache.clear();
    cache.namespaces();
    assert_eq!(source.namespace_calls(), 2);
}

#[test]
fn cached_reads_do_not_wait_on_a_pending_fetch() {
    let source = Arc::new(FakeSource::slow(&["prod"], Duration::from_millis(300)));
    let (_rt, _clock, cache) = cache_over(source.clone(), Duration::from_secs(2));
    assert_eq!(cache.namespaces(), vec!["prod"]);

    std::thread::scope(|scope| {
        let pending = scope.spawn(|| cache.resources("cdn", "certificate", "prod"));
        std::thread::sleep(Duration::from_millis(50));

        let readers: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let started = Instant::now();
                    let items = cache.namespaces();
                    (items, started.elapsed())
                })
            })
            .collect();
        for reader in readers {
            let (items, elapsed) = reader.join().unwrap();
            assert_eq!(items, vec!["prod"]);
            assert!(elapsed < Duration::from_millis(200), "{:?}", elapsed);
        }

        assert_eq!(
            pending.join().unwrap(),
            vec!["prod-certificate-a", "prod-certificate-b"]
        );
    });
    assert_eq!(source.namespace_calls(), 1);
    assert_eq!(source.resource_calls(), 1);
}
