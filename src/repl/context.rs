//! Navigation context
//!
//! The shell is always in one of three states, derived from which parts of
//! the path are set: root (nothing), domain, or domain + action.

use crate::catalog::Registry;
use std::fmt;

/// Actions that can be entered as a navigation level under a domain.
pub const ACTIONS: &[&str] = &[
    "list",
    "get",
    "create",
    "delete",
    "replace",
    "apply",
    "status",
    "patch",
    "add-labels",
    "remove-labels",
    "discover",
];

/// One-line descriptions, same order as [`ACTIONS`].
pub const ACTION_DESCRIPTIONS: &[&str] = &[
    "List resources",
    "Get a specific resource",
    "Create a new resource",
    "Delete a resource",
    "Replace a resource",
    "Apply configuration from file",
    "Get resource status",
    "Patch a resource",
    "Add labels to a resource",
    "Remove labels from a resource",
    "Count resources per type",
];

/// Current position in the domain/action hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextPath {
    pub domain: String,
    pub action: String,
}

impl ContextPath {
    pub fn is_root(&self) -> bool {
        self.domain.is_empty()
    }

    pub fn is_domain(&self) -> bool {
        !self.domain.is_empty() && self.action.is_empty()
    }

    pub fn is_action(&self) -> bool {
        !self.domain.is_empty() && !self.action.is_empty()
    }

    /// Enter a domain; any action is cleared.
    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
        self.action.clear();
    }

    pub fn set_action(&mut self, action: impl Into<String>) {
        self.action = action.into();
    }

    /// Go up one level. Returns false when already at root.
    pub fn navigate_up(&mut self) -> bool {
        if !self.action.is_empty() {
            self.action.clear();
            true
        } else if !self.domain.is_empty() {
            self.domain.clear();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.domain.clear();
        self.action.clear();
    }
}

/// `domain/action`, `domain`, or empty at root.
impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.domain.is_empty(), self.action.is_empty()) {
            (true, _) => Ok(()),
            (false, true) => f.write_str(&self.domain),
            (false, false) => write!(f, "{}/{}", self.domain, self.action),
        }
    }
}

/// Decides which words are navigation targets.
#[derive(Debug, Clone, Copy)]
pub struct ContextValidator {
    registry: Registry,
}

impl ContextValidator {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn resolve_domain(&self, name: &str) -> Option<&'static str> {
        self.registry.resolve_domain(name)
    }

    pub fn is_valid_action(&self, name: &str) -> bool {
        ACTIONS.contains(&name)
    }
}
