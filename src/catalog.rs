//! Domain/resource catalog
//!
//! Static lookup table of the control plane's domains, their category and
//! the resource types each domain exposes. Compiled in and read-only.

mod domains;
pub mod registry;

pub use registry::Registry;

use serde::Serialize;
use std::fmt;

/// Fixed category taxonomy for domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    Infrastructure,
    Networking,
    Operations,
    Platform,
    Security,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Ai,
        Category::Infrastructure,
        Category::Networking,
        Category::Operations,
        Category::Platform,
        Category::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Infrastructure => "Infrastructure",
            Category::Networking => "Networking",
            Category::Operations => "Operations",
            Category::Platform => "Platform",
            Category::Security => "Security",
        }
    }

    /// Case-insensitive parse from a user-supplied filter.
    pub fn parse(value: &str) -> Option<Category> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resource type within a domain.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceTypeInfo {
    /// Canonical name, e.g. `http_loadbalancer`
    pub name: &'static str,
    pub description: &'static str,
    /// List endpoint; `{namespace}` is substituted for namespaced types
    pub api_path: &'static str,
    pub namespaced: bool,
}

impl ResourceTypeInfo {
    /// Collection path for a namespace.
    pub fn collection_path(&self, namespace: &str) -> String {
        if self.namespaced {
            self.api_path.replace("{namespace}", namespace)
        } else {
            self.api_path.to_string()
        }
    }
}

/// Domain metadata.
#[derive(Debug, Clone, Serialize)]
pub struct DomainInfo {
    pub name: &'static str,
    pub category: Category,
    pub display_name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub resource_types: &'static [ResourceTypeInfo],
}
