//! Built-in shell commands and their name table.

use std::collections::BTreeMap;

/// Commands handled by the shell itself rather than the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Quit,
    Help,
    Clear,
    History,
    Namespace,
    Context,
    Domains,
}

impl Builtin {
    pub fn description(&self) -> &'static str {
        match self {
            Builtin::Quit => "Exit the shell",
            Builtin::Help => "Show help information",
            Builtin::Clear => "Clear the screen",
            Builtin::History => "Show command history",
            Builtin::Namespace => "Show or set the default namespace",
            Builtin::Context => "Show current context",
            Builtin::Domains => "List domains by category",
        }
    }
}

const NAMES: &[(&str, Builtin)] = &[
    ("quit", Builtin::Quit),
    ("help", Builtin::Help),
    ("clear", Builtin::Clear),
    ("history", Builtin::History),
    ("namespace", Builtin::Namespace),
    ("ns", Builtin::Namespace),
    ("context", Builtin::Context),
    ("ctx", Builtin::Context),
    ("domains", Builtin::Domains),
];

/// Name → builtin lookup, built once per session.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    by_name: BTreeMap<&'static str, Builtin>,
}

impl BuiltinRegistry {
    pub fn standard() -> Self {
        Self {
            by_name: NAMES.iter().copied().collect(),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Builtin> {
        self.by_name.get(name).copied()
    }

    /// All names including aliases, in table order.
    pub fn names(&self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(name, _)| self.by_name.contains_key(name))
            .map(|(name, _)| *name)
            .collect()
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

pub const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J\x1b[3J";

pub const ROOT_HELP: &str = "
xcsh Interactive Shell

Context Navigation:
  <domain>          Enter a domain context (e.g., load_balancer, cdn)
  <action>          Enter an action context inside a domain (e.g., list)
  exit              Go up one level (or exit the shell at root)
  back, ..          Go up one level
  root, /           Return to root context
  quit              Exit the shell immediately

Built-in Commands:
  help              Show this help, or help for the current context
  clear             Clear the screen
  history           Show command history
  namespace <ns>    Set default namespace (alias: ns)
  context           Show current context info (alias: ctx)
  domains           List domains (--category <name> to filter)

Commands:
  <domain> <action> <resource_type> [name] [flags]
  Flags: -n/--namespace, -o/--output-format json|yaml|table, -f/--file, --label k=v
  Prefix a command with / to run it from root without leaving the context.

Keyboard Shortcuts:
  Tab               Complete commands and arguments
  Ctrl+C twice      Exit the shell
  Ctrl+D            Exit the shell
  Up/Down           Navigate command history

Prompt Format: tenant:domain/action@namespace>
";
