//! `domains` listing grouped by category.

use crate::catalog::{Category, Registry};
use owo_colors::OwoColorize;

/// Render every category, or only `filter`, with its domains.
pub fn render_domains(registry: &Registry, filter: Option<Category>, color: bool) -> String {
    let mut out = String::new();
    let categories: Vec<Category> = registry
        .categories()
        .into_iter()
        .filter(|c| filter.map_or(true, |f| f == *c))
        .collect();

    if categories.is_empty() {
        out.push_str("No domains found.\n");
        return out;
    }

    for category in categories {
        let heading = category.as_str();
        if color {
            out.push_str(&format!("{}\n", heading.bold().underline()));
        } else {
            out.push_str(&format!("{}\n", heading));
        }
        for domain in registry.domains_by_category(category) {
            let aliases = if domain.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", domain.aliases.join(", "))
            };
            out.push_str(&format!(
                "  {:<28} {}{}\n",
                domain.name, domain.description, aliases
            ));
        }
        out.push('\n');
    }
    out
}
