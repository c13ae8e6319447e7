//! Completion providers
//!
//! Stateless producers of `(candidates, directive)` pairs. Static providers
//! read fixed tables or the registry; the namespace and resource-name
//! providers go through the [`CompletionCache`].

use super::cache::CompletionCache;
use crate::catalog::Registry;
use crate::config::DEFAULT_NAMESPACE;

/// A single completion suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: None,
        }
    }

    pub fn described(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: Some(description.into()),
        }
    }
}

/// How the line editor should treat the completion beyond our candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Never fall back to filesystem paths.
    NoFileCompletion,
}

/// Ordered candidates plus a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completions {
    pub candidates: Vec<Candidate>,
    pub directive: Directive,
}

impl Completions {
    fn filtered(candidates: impl IntoIterator<Item = Candidate>, prefix: &str) -> Self {
        Self {
            candidates: candidates
                .into_iter()
                .filter(|c| c.text.starts_with(prefix))
                .collect(),
            directive: Directive::NoFileCompletion,
        }
    }

    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            directive: Directive::NoFileCompletion,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate texts in order.
    pub fn texts(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.text.as_str()).collect()
    }
}

const LABEL_KEYS: &[(&str, &str)] = &[
    ("environment", "Deployment environment (dev, staging, prod)"),
    ("application", "Application name"),
    ("owner", "Resource owner or team"),
    ("cost-center", "Cost center for billing"),
    ("tier", "Application tier (frontend, backend, database)"),
    ("version", "Application version"),
];

const OUTPUT_FORMATS: &[(&str, &str)] = &[
    ("json", "JSON format"),
    ("yaml", "YAML format"),
    ("table", "Table format (default)"),
];

/// Namespaces offered when the namespace list cannot be fetched.
const FALLBACK_NAMESPACES: &[&str] = &["default", "system"];

/// Common label keys for `--label`.
pub fn label_keys(prefix: &str) -> Completions {
    Completions::filtered(
        LABEL_KEYS
            .iter()
            .map(|(key, desc)| Candidate::described(*key, *desc)),
        prefix,
    )
}

/// Values for `-o/--output-format`.
pub fn output_formats(prefix: &str) -> Completions {
    Completions::filtered(
        OUTPUT_FORMATS
            .iter()
            .map(|(name, desc)| Candidate::described(*name, *desc)),
        prefix,
    )
}

/// Values for `-n/--namespace`.
pub fn namespaces(cache: &CompletionCache, prefix: &str) -> Completions {
    let mut names = cache.namespaces();
    if names.is_empty() {
        names = FALLBACK_NAMESPACES.iter().map(|s| s.to_string()).collect();
    }
    Completions::filtered(names.into_iter().map(Candidate::new), prefix)
}

/// Resource types of one domain. Registry only, never the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTypeCompleter {
    pub domain: String,
}

impl ResourceTypeCompleter {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    pub fn complete(&self, registry: &Registry, prefix: &str) -> Completions {
        let Some(domain) = registry.domain(&self.domain) else {
            return Completions::empty();
        };
        Completions::filtered(
            domain
                .resource_types
                .iter()
                .map(|rt| Candidate::described(rt.name, rt.description)),
            prefix,
        )
    }
}

/// Instance names of one resource type, through the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNameCompleter {
    pub domain: String,
    pub resource_type: String,
}

impl ResourceNameCompleter {
    pub fn new(domain: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            resource_type: resource_type.into(),
        }
    }

    /// `namespace` is the active one if any; otherwise `default_namespace`,
    /// and `default` when that is empty too.
    pub fn complete(
        &self,
        cache: &CompletionCache,
        namespace: Option<&str>,
        default_namespace: &str,
        prefix: &str,
    ) -> Completions {
        let namespace = namespace
            .filter(|ns| !ns.is_empty())
            .or(Some(default_namespace).filter(|ns| !ns.is_empty()))
            .unwrap_or(DEFAULT_NAMESPACE);
        let names = cache.resources(&self.domain, &self.resource_type, namespace);
        Completions::filtered(names.into_iter().map(Candidate::new), prefix)
    }
}

/// Everything a provider may consult.
pub struct ProviderContext<'a> {
    pub registry: &'a Registry,
    pub cache: &'a CompletionCache,
    /// Namespace given explicitly on the line being completed
    pub namespace: Option<&'a str>,
    /// Session namespace
    pub default_namespace: &'a str,
}

/// Provider selected for the word under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    Domains,
    Actions,
    Builtins(Vec<&'static str>),
    LabelKeys,
    OutputFormats,
    Namespaces,
    ResourceTypes(ResourceTypeCompleter),
    ResourceNames(ResourceNameCompleter),
    /// Fixed word list, e.g. navigation keywords or flag names
    Words(Vec<&'static str>),
}

impl Provider {
    pub fn complete(&self, ctx: &ProviderContext<'_>, prefix: &str) -> Completions {
        match self {
            Provider::Domains => domain_names(ctx.registry, prefix),
            Provider::Actions => Completions::filtered(
                crate::repl::context::ACTIONS.iter().map(|a| Candidate::new(*a)),
                prefix,
            ),
            Provider::Builtins(names) | Provider::Words(names) => {
                Completions::filtered(names.iter().map(|n| Candidate::new(*n)), prefix)
            }
            Provider::LabelKeys => label_keys(prefix),
            Provider::OutputFormats => output_formats(prefix),
            Provider::Namespaces => namespaces(ctx.cache, prefix),
            Provider::ResourceTypes(completer) => completer.complete(ctx.registry, prefix),
            Provider::ResourceNames(completer) => {
                completer.complete(ctx.cache, ctx.namespace, ctx.default_namespace, prefix)
            }
        }
    }
}

/// Canonical domain names; aliases complete only when typed in full.
fn domain_names(registry: &Registry, prefix: &str) -> Completions {
    let mut candidates: Vec<Candidate> = registry
        .list_domains()
        .iter()
        .map(|d| Candidate::described(d.name, d.description))
        .collect();
    for domain in registry.list_domains() {
        for alias in domain.aliases {
            if *alias == prefix {
                candidates.push(Candidate::described(*alias, format!("alias for {}", domain.name)));
            }
        }
    }
    Completions::filtered(candidates, prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::cache::CacheSettings;
    use crate::completion::source::UnconfiguredSource;
    use std::sync::Arc;

    fn offline_cache(runtime: &tokio::runtime::Runtime) -> CompletionCache {
        CompletionCache::new(
            Arc::new(UnconfiguredSource),
            runtime.handle().clone(),
            CacheSettings::default(),
        )
    }

    #[test]
    fn test_label_keys_prefix() {
        let completions = label_keys("e");
        assert_eq!(completions.texts(), vec!["environment"]);
        assert_eq!(label_keys("").candidates.len(), 6);
    }

    #[test]
    fn test_output_formats_described() {
        let completions = output_formats("");
        assert_eq!(completions.texts(), vec!["json", "yaml", "table"]);
        assert_eq!(
            completions.candidates[2].description.as_deref(),
            Some("Table format (default)")
        );
    }

    #[test]
    fn test_resource_types_from_registry() {
        let registry = Registry::builtin();
        let completer = ResourceTypeCompleter::new("cdn");
        let completions = completer.complete(&registry, "cdn_");
        assert!(completions.texts().contains(&"cdn_loadbalancer"));
        assert!(!completions.texts().contains(&"certificate"));

        let unknown = ResourceTypeCompleter::new("nope").complete(&registry, "");
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_namespace_fallback_when_unreachable() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let cache = offline_cache(&runtime);
        assert_eq!(namespaces(&cache, "").texts(), vec!["default", "system"]);
        assert_eq!(namespaces(&cache, "sy").texts(), vec!["system"]);
    }

    #[test]
    fn test_every_provider_disables_file_completion() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let cache = offline_cache(&runtime);
        let registry = Registry::builtin();
        let ctx = ProviderContext {
            registry: &registry,
            cache: &cache,
            namespace: None,
            default_namespace: "",
        };
        let providers = vec![
            Provider::Domains,
            Provider::Actions,
            Provider::Builtins(vec!["help", "quit"]),
            Provider::LabelKeys,
            Provider::OutputFormats,
            Provider::Namespaces,
            Provider::ResourceTypes(ResourceTypeCompleter::new("cdn")),
            Provider::ResourceNames(ResourceNameCompleter::new("cdn", "certificate")),
            Provider::Words(vec!["back", "root"]),
        ];
        for provider in providers {
            for prefix in ["", "x", "c"] {
                assert_eq!(
                    provider.complete(&ctx, prefix).directive,
                    Directive::NoFileCompletion,
                    "{:?}",
                    provider
                );
            }
        }
    }

    #[test]
    fn test_domain_alias_completes_when_exact() {
        let registry = Registry::builtin();
        let completions = domain_names(&registry, "lb");
        assert_eq!(completions.texts(), vec!["lb"]);
        assert!(domain_names(&registry, "load").texts().contains(&"load_balancer"));
    }
}
