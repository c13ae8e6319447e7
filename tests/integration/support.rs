use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use xcsh::catalog::Registry;
use xcsh::commands::CommandHandler;
use xcsh::completion::{CacheSettings, CompletionSource};
use xcsh::error::ShellError;
use xcsh::repl::console::{Captured, Console};
use xcsh::repl::session::cache_slot;
use xcsh::repl::{CommandHistory, Session, SessionOptions};

/// Scripted control plane with call counters and an optional delay.
pub struct FakeSource {
    pub namespaces: Vec<String>,
    pub delay: Duration,
    pub namespace_calls: AtomicUsize,
    pub resource_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(namespaces: &[&str]) -> Self {
        Self {
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            delay: Duration::ZERO,
            namespace_calls: AtomicUsize::new(0),
            resource_calls: AtomicUsize::new(0),
        }
    }

    pub fn slow(namespaces: &[&str], delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(namespaces)
        }
    }

    pub fn namespace_calls(&self) -> usize {
        self.namespace_calls.load(Ordering::SeqCst)
    }

    pub fn resource_calls(&self) -> usize {
        self.resource_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionSource for FakeSource {
    async fn fetch_namespaces(&self, _timeout: Duration) -> Result<Vec<String>, ShellError> {
        self.namespace_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(self.namespaces.clone())
    }

    async fn fetch_resource_instances(
        &self,
        _domain: &str,
        resource_type: &str,
        namespace: &str,
        _timeout: Duration,
    ) -> Result<Vec<String>, ShellError> {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(vec![
            format!("{}-{}-a", namespace, resource_type),
            format!("{}-{}-b", namespace, resource_type),
        ])
    }
}

/// Handler that records dispatched argument vectors.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl CommandHandler for RecordingHandler {
    fn run(&mut self, args: &[String]) -> Result<String, ShellError> {
        self.calls.lock().push(args.to_vec());
        match args.get(2).map(String::as_str) {
            Some("forbidden") => Err(ShellError::ApiError {
                status: 403,
                message: "access denied".to_string(),
            }),
            _ => Ok(format!("ran {}", args.join(" "))),
        }
    }
}

pub struct Harness {
    pub runtime: tokio::runtime::Runtime,
    pub session: Session,
    pub handler: RecordingHandler,
    pub output: Captured,
    pub source: Arc<FakeSource>,
}

impl Harness {
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.handler.calls.lock().clone()
    }
}

pub fn harness(namespace: &str, source: FakeSource) -> Harness {
    harness_with(namespace, source, None)
}

pub fn harness_with(
    namespace: &str,
    source: FakeSource,
    settings_path: Option<std::path::PathBuf>,
) -> Harness {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let source = Arc::new(source);
    let handler = RecordingHandler::default();
    let (console, output) = Console::captured();
    let session = Session::new(
        SessionOptions {
            namespace: namespace.to_string(),
            api_url: Some("https://acme.console.ves.volterra.io".to_string()),
            color_enabled: false,
            history: CommandHistory::in_memory(100),
            settings_path,
            registry: Registry::builtin(),
        },
        Box::new(handler.clone()),
        cache_slot(
            source.clone(),
            runtime.handle().clone(),
            CacheSettings {
                ttl: Duration::from_secs(3),
                fetch_timeout: Duration::from_millis(200),
            },
        ),
        console,
    );
    Harness {
        runtime,
        session,
        handler,
        output,
        source,
    }
}

pub fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}
