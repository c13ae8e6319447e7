use crate::integration::support::{harness, words, FakeSource};
use proptest::prelude::*;
use xcsh::config::ConfigLoader;
use xcsh::repl::session::INTERRUPT_HINT;
use xcsh::repl::{InterruptOutcome, Outcome};

#[test]
fn root_domain_action_round_trip() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    h.session.execute_command("cdn");
    h.session.execute_command("discover");
    assert_eq!(h.session.context().to_string(), "cdn/discover");
    assert_eq!(h.session.prompt(), "acme:cdn/discover@prod> ");

    h.session.execute_command("..");
    assert_eq!(h.session.context().to_string(), "cdn");
    h.session.execute_command("back");
    assert!(h.session.context().is_root());
    assert_eq!(h.session.execute_command("exit"), Outcome::Exit);
}

#[test]
fn alias_enters_canonical_domain() {
    let mut h = harness("", FakeSource::new(&[]));
    h.session.execute_command("sec");
    assert_eq!(h.session.context().domain, "security");
}

#[test]
fn unknown_word_in_domain_is_dispatched() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    h.session.execute_command("security");
    h.session.execute_command("app_firewall");
    assert!(h.session.context().is_domain());
    assert_eq!(
        h.calls(),
        vec![words("security app_firewall -n prod")]
    );
}

#[test]
fn root_escape_runs_without_leaving_context() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    h.session.execute_command("cdn");
    h.session.execute_command("list");
    h.session.execute_command("/ networking list dns_zone");
    assert_eq!(h.calls(), vec![words("networking list dns_zone -n prod")]);
    assert_eq!(h.session.context().to_string(), "cdn/list");
}

#[test]
fn context_builtin_reports_state() {
    let mut h = harness("prod", FakeSource::new(&["prod"]));
    h.session.execute_command("load_balancer");
    h.session.execute_command("ctx");
    let out = h.output.stdout();
    assert!(out.contains("Current Context:"));
    assert!(out.contains("  Tenant:    acme"));
    assert!(out.contains("  Domain:    load_balancer"));
    assert!(out.contains("  Action:    (none)"));
    assert!(out.contains("  Namespace: prod"));
    assert!(out.contains("  Path:      load_balancer"));
}

#[test]
fn help_depends_on_context() {
    let mut h = harness("", FakeSource::new(&[]));
    h.session.execute_command("help");
    assert!(h.output.stdout().contains("Context Navigation:"));
    h.output.clear();

    h.session.execute_command("cdn");
    h.session.execute_command("help");
    let out = h.output.stdout();
    assert!(out.contains("Available actions in 'cdn'"));
    assert!(out.contains("cdn_loadbalancer"));
    h.output.clear();

    h.session.execute_command("list");
    h.session.execute_command("help");
    assert!(h.output.stdout().contains("Commands execute with 'cdn list' prepended."));
}

#[test]
fn namespace_change_is_persisted_and_resets_cache() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("config.toml");
    let mut h = crate::integration::support::harness_with(
        "default",
        FakeSource::new(&["default", "staging"]),
        Some(path.clone()),
    );

    h.session.complete_input("cdn list certificate -n ", 24);
    assert!(h.session.cache().is_initialized());

    h.session.execute_command("namespace staging");
    assert_eq!(h.session.namespace(), "staging");
    assert!(h.output.stdout().contains("Default namespace set to: staging"));
    assert!(!h.session.cache().is_initialized());
    assert_eq!(ConfigLoader::load_from_file(&path).unwrap().namespace, "staging");
    assert_eq!(h.session.prompt(), "acme@staging> ");
}

#[test]
fn unreachable_namespace_list_accepts_any_namespace() {
    let mut h = harness("default", FakeSource::new(&[]));
    h.session.execute_command("ns anything");
    assert_eq!(h.session.namespace(), "anything");
    assert_eq!(h.session.last_exit_code(), 0);
}

#[test]
fn double_interrupt_inside_window_terminates() {
    let mut h = harness("", FakeSource::new(&[]));
    let t0 = std::time::Instant::now();
    assert_eq!(h.session.handle_interrupt(t0), InterruptOutcome::Hint);
    assert_eq!(
        h.session
            .handle_interrupt(t0 + std::time::Duration::from_millis(499)),
        InterruptOutcome::Terminate
    );
}

#[test]
fn interrupts_exactly_at_window_edge_each_hint() {
    let mut h = harness("", FakeSource::new(&[]));
    let t0 = std::time::Instant::now();
    let window = std::time::Duration::from_millis(500);
    assert_eq!(h.session.handle_interrupt(t0), InterruptOutcome::Hint);
    assert_eq!(h.session.handle_interrupt(t0 + window), InterruptOutcome::Hint);
    assert_eq!(h.output.stdout().matches(INTERRUPT_HINT).count(), 2);
}

#[test]
fn explicit_namespace_completes_after_default_is_cached() {
    let h = harness("default", FakeSource::new(&["default", "staging"]));
    let texts = |line: &str| -> Vec<String> {
        h.session
            .complete_input(line, line.len())
            .1
            .into_iter()
            .map(|c| c.text)
            .collect()
    };

    assert_eq!(
        texts("cdn get certificate "),
        vec!["default-certificate-a", "default-certificate-b"]
    );
    assert_eq!(
        texts("cdn get certificate -n staging "),
        vec!["staging-certificate-a", "staging-certificate-b"]
    );
    assert_eq!(h.source.resource_calls(), 2);
}

#[test]
fn completion_cache_is_built_once_across_threads() {
    let h = harness("default", FakeSource::new(&["default"]));
    let slot = h.session.cache().clone();
    assert!(!slot.is_initialized());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let slot = slot.clone();
            std::thread::spawn(move || slot.get())
        })
        .collect();
    let caches: Vec<_> = handles.into_iter().map(|t| t.join().unwrap()).collect();
    assert!(caches.iter().all(|c| std::sync::Arc::ptr_eq(c, &caches[0])));
    assert!(std::sync::Arc::ptr_eq(&slot.get(), &caches[0]));

    slot.reset();
    assert!(!std::sync::Arc::ptr_eq(&slot.get(), &caches[0]));
}

fn nav_word() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "cdn", "lb", "security", "list", "get", "discover", "exit", "back", "..", "root", "/",
        "bogus",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn navigation_keeps_context_well_formed(sequence in prop::collection::vec(nav_word(), 0..24)) {
        let mut h = harness("prod", FakeSource::new(&["prod"]));
        for word in sequence {
            if h.session.execute_command(word) == Outcome::Exit {
                prop_assert!(h.session.context().is_root());
                break;
            }
            let ctx = h.session.context().clone();
            prop_assert!(ctx.action.is_empty() || !ctx.domain.is_empty());
            if !ctx.domain.is_empty() {
                prop_assert!(xcsh::catalog::Registry::builtin().domain(&ctx.domain).is_some());
                prop_assert!(h.session.prompt().contains(&ctx.to_string()));
            }
        }
    }
}
