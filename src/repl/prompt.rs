//! Prompt rendering
//!
//! `tenant:domain/action@namespace> ` with every segment optional. A single
//! renderer serves both plain and colored output; [`PromptStyle`] decides
//! how each segment is painted.

use super::context::ContextPath;
use crate::client::url::{LOCAL_TENANT, UNKNOWN_TENANT};
use owo_colors::Style;
use std::io::IsTerminal;

const FALLBACK: &str = "xcsh";

/// Per-segment styles; `None` leaves the segment unpainted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptStyle {
    pub tenant: Option<Style>,
    pub domain: Option<Style>,
    pub action: Option<Style>,
    pub namespace: Option<Style>,
    pub fallback: Option<Style>,
}

impl PromptStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn colored() -> Self {
        Self {
            tenant: Some(Style::new().cyan()),
            domain: Some(Style::new().green()),
            action: Some(Style::new().yellow()),
            namespace: Some(Style::new().magenta()),
            fallback: Some(Style::new().bold()),
        }
    }

    pub fn for_color(enabled: bool) -> Self {
        if enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

fn paint(text: &str, style: Option<Style>) -> String {
    match style {
        Some(style) => style.style(text).to_string(),
        None => text.to_string(),
    }
}

/// Whether the tenant is worth showing.
fn visible_tenant(tenant: &str) -> bool {
    !tenant.is_empty() && tenant != UNKNOWN_TENANT && tenant != LOCAL_TENANT
}

/// Render the prompt for the given state.
pub fn render_prompt(
    tenant: &str,
    context: &ContextPath,
    namespace: &str,
    style: &PromptStyle,
) -> String {
    let mut prompt = String::new();

    if visible_tenant(tenant) {
        prompt.push_str(&paint(tenant, style.tenant));
    }

    if !context.domain.is_empty() {
        if !prompt.is_empty() {
            prompt.push(':');
        }
        prompt.push_str(&paint(&context.domain, style.domain));
        if !context.action.is_empty() {
            prompt.push('/');
            prompt.push_str(&paint(&context.action, style.action));
        }
    }

    if !namespace.is_empty() {
        prompt.push('@');
        prompt.push_str(&paint(namespace, style.namespace));
    }

    if prompt.is_empty() {
        prompt.push_str(&paint(FALLBACK, style.fallback));
    }
    prompt.push_str("> ");
    prompt
}

/// Color is off for `NO_COLOR`, `TERM=dumb` and non-terminal stdout.
pub fn detect_color_support() -> bool {
    color_allowed(
        std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
        std::env::var("TERM").ok().as_deref(),
        std::io::stdout().is_terminal(),
    )
}

fn color_allowed(no_color: bool, term: Option<&str>, stdout_is_tty: bool) -> bool {
    !no_color && term != Some("dumb") && stdout_is_tty
}
