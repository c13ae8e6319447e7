use crate::integration::support::{harness, words, FakeSource};
use clap::Parser;
use std::sync::Arc;
use xcsh::catalog::Registry;
use xcsh::commands::ApiHandler;
use xcsh::completion::{CacheSettings, UnconfiguredSource};
use xcsh::repl::console::Console;
use xcsh::repl::session::cache_slot;
use xcsh::repl::{CommandHistory, Session, SessionOptions};
use xcsh::tooling::Cli;

#[test]
fn batch_words_dispatch_with_default_namespace() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    let code = h
        .session
        .execute_batch(words("load_balancer list http_loadbalancer"));
    assert_eq!(code, 0);
    assert_eq!(
        h.calls(),
        vec![words("load_balancer list http_loadbalancer -n prod")]
    );
    assert!(h
        .output
        .stdout()
        .contains("ran load_balancer list http_loadbalancer -n prod"));
}

#[test]
fn batch_failure_maps_exit_code() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    let code = h.session.execute_batch(words("security get forbidden x"));
    assert_eq!(code, 4);
    assert!(h.output.stderr().starts_with("Error: API error (status 403)"));
}

#[test]
fn batch_builtin_runs_without_handler() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    assert_eq!(h.session.execute_batch(words("domains --category security")), 0);
    assert!(h.output.stdout().starts_with("Security\n"));
    assert!(h.calls().is_empty());

    assert_eq!(h.session.execute_batch(words("domains --category nope")), 1);
    assert!(h.output.stderr().contains("unknown category 'nope'"));
}

#[test]
fn empty_batch_prints_help() {
    let mut h = harness("", FakeSource::new(&[]));
    assert_eq!(h.session.execute_batch(Vec::new()), 0);
    assert!(h.output.stdout().contains("Built-in Commands:"));
}

#[test]
fn unconfigured_api_reports_missing_endpoint() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let registry = Registry::builtin();
    let (console, output) = Console::captured();
    let mut session = Session::new(
        SessionOptions {
            namespace: "default".to_string(),
            api_url: None,
            color_enabled: false,
            history: CommandHistory::in_memory(10),
            settings_path: None,
            registry,
        },
        Box::new(ApiHandler::new(None, registry, runtime.handle().clone())),
        cache_slot(
            Arc::new(UnconfiguredSource),
            runtime.handle().clone(),
            CacheSettings::default(),
        ),
        console,
    );

    let code = session.execute_batch(words("cdn list certificate"));
    assert_eq!(code, 3);
    assert!(output.stderr().contains("API client not configured"));
    assert_eq!(session.tenant(), "");
    assert_eq!(session.prompt(), "@default> ");
}

#[test]
fn cli_words_reach_the_dispatcher_verbatim() {
    let cli = Cli::parse_from(["xcsh", "cdn", "get", "certificate", "edge", "-o", "yaml"]);
    let mut h = harness("", FakeSource::new(&[]));
    h.session.execute_batch(cli.words.clone());
    assert_eq!(h.calls(), vec![words("cdn get certificate edge -o yaml")]);
}
