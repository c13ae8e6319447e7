//! Registry lookups over the static domain table.

use super::domains::DOMAINS;
use super::{Category, DomainInfo, ResourceTypeInfo};

/// Read-only view over a domain table.
///
/// Absent domains yield empty results rather than errors.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    domains: &'static [DomainInfo],
}

impl Registry {
    /// Registry over the compiled-in catalog.
    pub fn builtin() -> Self {
        Self { domains: DOMAINS }
    }

    /// All domains in catalog order.
    pub fn list_domains(&self) -> &'static [DomainInfo] {
        self.domains
    }

    /// Look up a domain by canonical name or alias.
    pub fn domain(&self, name: &str) -> Option<&'static DomainInfo> {
        self.domains
            .iter()
            .find(|d| d.name == name || d.aliases.contains(&name))
    }

    /// Canonical name for a domain name or alias.
    pub fn resolve_domain(&self, name: &str) -> Option<&'static str> {
        self.domain(name).map(|d| d.name)
    }

    pub fn is_domain(&self, name: &str) -> bool {
        self.domain(name).is_some()
    }

    /// Resource type names for a domain, in catalog order.
    pub fn list_resource_types(&self, domain: &str) -> Vec<&'static str> {
        self.domain(domain)
            .map(|d| d.resource_types.iter().map(|rt| rt.name).collect())
            .unwrap_or_default()
    }

    pub fn resource_type(&self, domain: &str, name: &str) -> Option<&'static ResourceTypeInfo> {
        self.domain(domain)
            .and_then(|d| d.resource_types.iter().find(|rt| rt.name == name))
    }

    /// Domains in a category, sorted by display name.
    pub fn domains_by_category(&self, category: Category) -> Vec<&'static DomainInfo> {
        let mut domains: Vec<&'static DomainInfo> = self
            .domains
            .iter()
            .filter(|d| d.category == category)
            .collect();
        domains.sort_by(|a, b| a.display_name.cmp(b.display_name));
        domains
    }

    /// Categories that have at least one domain, sorted alphabetically.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.domains.iter().map(|d| d.category).collect();
        categories.sort_by_key(|c| c.as_str());
        categories.dedup();
        categories
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
