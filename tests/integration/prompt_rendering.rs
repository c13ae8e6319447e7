use crate::integration::support::{harness, FakeSource};
use xcsh::client::extract_tenant;
use xcsh::repl::{render_prompt, ContextPath, PromptStyle};

fn path(domain: &str, action: &str) -> ContextPath {
    let mut ctx = ContextPath::default();
    if !domain.is_empty() {
        ctx.set_domain(domain);
    }
    if !action.is_empty() {
        ctx.set_action(action);
    }
    ctx
}

#[test]
fn every_segment_is_optional() {
    let plain = PromptStyle::plain();
    let cases = [
        ("acme", "cdn", "list", "prod", "acme:cdn/list@prod> "),
        ("acme", "", "", "prod", "acme@prod> "),
        ("", "cdn", "", "", "cdn> "),
        ("", "", "", "", "xcsh> "),
        ("local", "", "", "", "xcsh> "),
        ("unknown", "security", "", "", "security> "),
    ];
    for (tenant, domain, action, namespace, expected) in cases {
        assert_eq!(
            render_prompt(tenant, &path(domain, action), namespace, &plain),
            expected
        );
    }
}

#[test]
fn colored_prompt_keeps_plain_text() {
    let colored = render_prompt("acme", &path("cdn", "list"), "prod", &PromptStyle::colored());
    let stripped: String = {
        let mut out = String::new();
        let mut in_escape = false;
        for ch in colored.chars() {
            match (in_escape, ch) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm') => in_escape = false,
                (false, c) => out.push(c),
                _ => {}
            }
        }
        out
    };
    assert_eq!(stripped, "acme:cdn/list@prod> ");
}

#[test]
fn tenant_comes_from_first_host_label() {
    assert_eq!(extract_tenant("https://acme.console.ves.volterra.io/api"), "acme");
    assert_eq!(extract_tenant("http://localhost:8080"), "local");
    assert_eq!(extract_tenant("http://127.0.0.1:8080"), "local");
}

#[test]
fn session_banner_reflects_connection() {
    let h = harness("shared", FakeSource::new(&[]));
    let banner = h.session.banner();
    assert!(banner.contains("Distributed Cloud Shell"));
    assert!(banner.contains("• Tenant: acme"));
    assert!(banner.contains("• Namespace: shared"));
}
