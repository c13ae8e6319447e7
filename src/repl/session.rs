//! Shell session state machine
//!
//! Holds everything that survives between input lines: navigation context,
//! namespace, history and the last interrupt. Input is routed in a fixed
//! order: navigation, then builtins, then context-aware resource commands.

use super::banner::{render_banner, BannerInfo};
use super::builtins::{Builtin, BuiltinRegistry, CLEAR_SCREEN, ROOT_HELP};
use super::console::Console;
use super::context::{ContextPath, ContextValidator, ACTIONS, ACTION_DESCRIPTIONS};
use super::history::CommandHistory;
use super::input::{current_word, parse_input_args};
use super::prompt::{render_prompt, PromptStyle};
use crate::catalog::{Category, Registry};
use crate::client::{extract_tenant, ApiClient};
use crate::commands::domains::render_domains;
use crate::commands::{ApiHandler, CommandHandler};
use crate::completion::providers::{ResourceNameCompleter, ResourceTypeCompleter};
use crate::completion::{
    CacheSettings, Candidate, CompletionCache, CompletionSource, Provider, ProviderContext,
    UnconfiguredSource,
};
use crate::concurrency::SharedSlot;
use crate::config::paths::xdg_root::default_history_path;
use crate::config::{ConfigLoader, XcshConfig};
use crate::error::ShellError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

/// Two interrupts closer than this end the session.
pub const INTERRUPT_WINDOW: Duration = Duration::from_millis(500);

pub const INTERRUPT_HINT: &str = "Press Ctrl+C again to exit, or continue typing";
pub const FAREWELL: &str = "Goodbye!";

const NAV_DOMAIN: &[&str] = &["exit", "back", "..", "help"];
const NAV_ACTION: &[&str] = &["exit", "back", "..", "root", "/", "help"];
const FLAGS: &[&str] = &[
    "-n",
    "--namespace",
    "-o",
    "--output-format",
    "-f",
    "--file",
    "--label",
    "--help",
];
const VALUE_FLAGS: &[&str] = &["-n", "--namespace", "-o", "--output-format", "-f", "--file", "--label"];
/// Actions whose fourth word is an existing resource name.
const NAMED_ACTIONS: &[&str] = &[
    "get",
    "status",
    "delete",
    "replace",
    "patch",
    "add-labels",
    "remove-labels",
];

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// First interrupt in the window; the hint was printed.
    Hint,
    /// Second interrupt inside the window.
    Terminate,
}

/// Construction parameters for a [`Session`].
pub struct SessionOptions {
    pub namespace: String,
    pub api_url: Option<String>,
    pub color_enabled: bool,
    pub history: CommandHistory,
    /// Config file that `namespace <ns>` writes to; None disables persistence
    pub settings_path: Option<PathBuf>,
    pub registry: Registry,
}

pub struct Session {
    context: ContextPath,
    namespace: String,
    tenant: String,
    api_url: Option<String>,
    color_enabled: bool,
    history: CommandHistory,
    last_interrupt: Option<Instant>,
    last_exit_code: i32,

    registry: Registry,
    validator: ContextValidator,
    builtins: BuiltinRegistry,
    handler: Box<dyn CommandHandler>,
    cache: Arc<SharedSlot<CompletionCache>>,
    settings_path: Option<PathBuf>,
    console: Console,
}

/// Build the lazily initialised cache slot over `source`.
pub fn cache_slot(
    source: Arc<dyn CompletionSource>,
    runtime: Handle,
    settings: CacheSettings,
) -> Arc<SharedSlot<CompletionCache>> {
    Arc::new(SharedSlot::new(move || {
        debug!("Building completion cache");
        CompletionCache::new(Arc::clone(&source), runtime.clone(), settings)
    }))
}

impl Session {
    pub fn new(
        options: SessionOptions,
        handler: Box<dyn CommandHandler>,
        cache: Arc<SharedSlot<CompletionCache>>,
        console: Console,
    ) -> Self {
        let tenant = options
            .api_url
            .as_deref()
            .map(extract_tenant)
            .unwrap_or_default();
        Self {
            context: ContextPath::default(),
            namespace: options.namespace,
            tenant,
            api_url: options.api_url,
            color_enabled: options.color_enabled,
            history: options.history,
            last_interrupt: None,
            last_exit_code: 0,
            validator: ContextValidator::new(options.registry),
            registry: options.registry,
            builtins: BuiltinRegistry::standard(),
            handler,
            cache,
            settings_path: options.settings_path,
            console,
        }
    }

    /// Wire a session from configuration.
    ///
    /// Fails when the API URL is malformed or the configured namespace is
    /// absent from a namespace list that could be fetched.
    pub fn bootstrap(
        config: &XcshConfig,
        settings_path: Option<PathBuf>,
        color_enabled: bool,
        runtime: Handle,
    ) -> Result<Self, ShellError> {
        let registry = Registry::builtin();
        let client = match config.api_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => Some(Arc::new(ApiClient::new(url, config.api_token.as_deref())?)),
            None => {
                warn!("No API URL configured");
                None
            }
        };
        let source: Arc<dyn CompletionSource> = match &client {
            Some(client) => client.clone(),
            None => Arc::new(UnconfiguredSource),
        };
        let cache = cache_slot(
            source,
            runtime.clone(),
            CacheSettings::from(&config.completion),
        );

        let history_path = config
            .history
            .path
            .clone()
            .unwrap_or_else(default_history_path);
        let history = match CommandHistory::load(&history_path, config.history.max_entries) {
            Ok(history) => history,
            Err(e) => {
                warn!(path = %history_path.display(), error = %e, "Could not load history");
                CommandHistory::in_memory(config.history.max_entries)
            }
        };

        let handler = Box::new(ApiHandler::new(client.clone(), registry, runtime));
        let session = Self::new(
            SessionOptions {
                namespace: config.namespace.clone(),
                api_url: client.as_ref().map(|c| c.base_url().to_string()),
                color_enabled,
                history,
                settings_path,
                registry,
            },
            handler,
            cache,
            Console::stdio(),
        );

        if client.is_some() && !session.namespace.is_empty() {
            session.validate_namespace(&session.namespace)?;
        }
        info!(
            tenant = %session.tenant,
            namespace = %session.namespace,
            "Session initialised"
        );
        Ok(session)
    }

    pub fn context(&self) -> &ContextPath {
        &self.context
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    pub fn color_enabled(&self) -> bool {
        self.color_enabled
    }

    pub fn last_exit_code(&self) -> i32 {
        self.last_exit_code
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn cache(&self) -> &Arc<SharedSlot<CompletionCache>> {
        &self.cache
    }

    pub fn prompt(&self) -> String {
        render_prompt(
            &self.tenant,
            &self.context,
            &self.namespace,
            &PromptStyle::for_color(self.color_enabled),
        )
    }

    pub fn banner(&self) -> String {
        render_banner(
            &BannerInfo {
                version: env!("CARGO_PKG_VERSION").to_string(),
                tenant: Some(self.tenant.clone()).filter(|t| !t.is_empty()),
                api_url: self.api_url.clone(),
                namespace: self.namespace.clone(),
            },
            self.color_enabled,
        )
    }

    pub fn print_banner(&mut self) {
        let banner = self.banner();
        self.console.print(&banner);
    }

    /// Process one line of interactive input.
    pub fn execute_command(&mut self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Continue;
        }
        self.history.add(line);

        let args = parse_input_args(line);
        if args.is_empty() {
            return Outcome::Continue;
        }

        if let Some(outcome) = self.handle_navigation(&args) {
            self.last_exit_code = 0;
            return outcome;
        }

        if let Some(builtin) = self.builtins.resolve(&args[0]) {
            return self.dispatch_builtin(builtin, &args[1..]);
        }

        self.run_command(args);
        Outcome::Continue
    }

    /// Run one command outside the interactive loop; returns its exit code.
    pub fn execute_batch(&mut self, args: Vec<String>) -> i32 {
        if args.is_empty() {
            self.console.print(ROOT_HELP);
            return 0;
        }
        if let Some(builtin) = self.builtins.resolve(&args[0]) {
            self.dispatch_builtin(builtin, &args[1..]);
        } else {
            self.run_command(args);
        }
        self.last_exit_code
    }

    fn dispatch_builtin(&mut self, builtin: Builtin, args: &[String]) -> Outcome {
        match self.run_builtin(builtin, args) {
            Ok(outcome) => {
                self.last_exit_code = 0;
                outcome
            }
            Err(e) => {
                self.console.eprintln(&format!("Error: {}", e));
                self.last_exit_code = 1;
                Outcome::Continue
            }
        }
    }

    /// `Some` when the line was a navigation command.
    fn handle_navigation(&mut self, args: &[String]) -> Option<Outcome> {
        // Multi-word lines are commands, not navigation
        if args.len() > 1 {
            return None;
        }
        let word = args[0].as_str();
        match word {
            "exit" => {
                if self.context.is_root() {
                    return Some(Outcome::Exit);
                }
                self.context.navigate_up();
                Some(Outcome::Continue)
            }
            "back" | ".." => {
                if !self.context.navigate_up() {
                    self.console.println("Already at root context");
                }
                Some(Outcome::Continue)
            }
            "root" | "/" => {
                self.context.reset();
                Some(Outcome::Continue)
            }
            _ if self.context.is_root() => {
                let canonical = self.validator.resolve_domain(word)?;
                self.context.set_domain(canonical);
                Some(Outcome::Continue)
            }
            _ if self.context.is_domain() && self.validator.is_valid_action(word) => {
                self.context.set_action(word);
                Some(Outcome::Continue)
            }
            _ => None,
        }
    }

    fn run_builtin(&mut self, builtin: Builtin, args: &[String]) -> Result<Outcome, ShellError> {
        match builtin {
            Builtin::Quit => return Ok(Outcome::Exit),
            Builtin::Help => {
                let text = self.help_text();
                self.console.println(&text);
            }
            Builtin::Clear => self.console.print(CLEAR_SCREEN),
            Builtin::History => {
                let listing: Vec<String> = self
                    .history
                    .entries()
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| format!("{:4}  {}", i + 1, entry))
                    .collect();
                for line in listing {
                    self.console.println(&line);
                }
            }
            Builtin::Namespace => self.namespace_command(args)?,
            Builtin::Context => {
                let text = self.context_summary();
                self.console.println(&text);
            }
            Builtin::Domains => {
                let filter = match args {
                    [] => None,
                    [flag, value] if flag == "--category" || flag == "-c" => {
                        Some(Category::parse(value).ok_or_else(|| {
                            ShellError::Usage(format!(
                                "unknown category '{}'; expected one of: {}",
                                value,
                                Category::ALL.map(|c| c.as_str()).join(", ")
                            ))
                        })?)
                    }
                    _ => {
                        return Err(ShellError::Usage(
                            "domains [--category <name>]".to_string(),
                        ))
                    }
                };
                let text = render_domains(&self.registry, filter, self.color_enabled);
                self.console.print(&text);
            }
        }
        Ok(Outcome::Continue)
    }

    fn namespace_command(&mut self, args: &[String]) -> Result<(), ShellError> {
        let Some(new_namespace) = args.first() else {
            let text = if self.namespace.is_empty() {
                "No default namespace set".to_string()
            } else {
                format!("Default namespace: {}", self.namespace)
            };
            self.console.println(&text);
            return Ok(());
        };

        self.validate_namespace(new_namespace)?;
        if let Some(path) = &self.settings_path {
            ConfigLoader::save_default_namespace(path, new_namespace)?;
        }
        self.namespace = new_namespace.clone();
        // Resource entries are keyed without namespace
        self.cache.reset();
        info!(namespace = %self.namespace, "Default namespace changed");
        self.console
            .println(&format!("Default namespace set to: {}", self.namespace));
        Ok(())
    }

    /// Reject a namespace missing from a fetched list; accept it when no list
    /// is available.
    fn validate_namespace(&self, namespace: &str) -> Result<(), ShellError> {
        let known = self.cache.get().namespaces();
        if known.is_empty() {
            warn!(namespace, "Namespace list unavailable; accepting namespace unchecked");
            return Ok(());
        }
        if known.iter().any(|n| n == namespace) {
            Ok(())
        } else {
            Err(ShellError::InvalidNamespace(format!(
                "namespace '{}' does not exist",
                namespace
            )))
        }
    }

    fn help_text(&self) -> String {
        if self.context.is_domain() {
            let mut text = format!("\nContext: {}\n\nAvailable actions in '{}':\n", self.context, self.context.domain);
            for (action, description) in ACTIONS.iter().zip(ACTION_DESCRIPTIONS) {
                text.push_str(&format!("  {:<16}  {}\n", action, description));
            }
            text.push_str("\nResource types:\n");
            if let Some(domain) = self.registry.domain(&self.context.domain) {
                for rt in domain.resource_types {
                    text.push_str(&format!("  {:<28}  {}\n", rt.name, rt.description));
                }
            }
            text.push_str("\nNavigation:\n  exit, back, ..    Return to root\n  <action>          Enter action context\n\nExample: list <resource_type> -n production\n");
            text
        } else if self.context.is_action() {
            format!(
                "\nContext: {}\n\nCommands execute with '{} {}' prepended.\nUse the resource type, name and flags directly.\n\nNavigation:\n  exit, back, ..    Return to domain context\n  root, /           Return to root\n\nExample: <resource_type> -n production --output-format json\n",
                self.context, self.context.domain, self.context.action
            )
        } else {
            ROOT_HELP.to_string()
        }
    }

    fn context_summary(&self) -> String {
        fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
            if value.is_empty() {
                fallback
            } else {
                value
            }
        }
        let path = self.context.to_string();
        format!(
            "Current Context:\n  Tenant:    {}\n  Domain:    {}\n  Action:    {}\n  Namespace: {}\n  Path:      {}",
            or(&self.tenant, "(not set)"),
            or(&self.context.domain, "(root)"),
            or(&self.context.action, "(none)"),
            or(&self.namespace, "(not set)"),
            or(&path, "/"),
        )
    }

    fn run_command(&mut self, args: Vec<String>) {
        let args = self.inject_namespace(self.prepend_context(args));
        debug!(?args, "Dispatching command");
        match self.handler.run(&args) {
            Ok(text) => {
                if !text.is_empty() {
                    self.console.println(&text);
                }
                self.last_exit_code = 0;
            }
            Err(e) => {
                warn!(error = %e, "Command failed");
                self.console.eprintln(&format!("Error: {}", e));
                self.last_exit_code = e.exit_code();
            }
        }
    }

    /// Prefix the current domain and action unless the line escapes to root
    /// with a leading `/` or already names a domain.
    pub fn prepend_context(&self, mut args: Vec<String>) -> Vec<String> {
        if args.is_empty() {
            return args;
        }
        if let Some(stripped) = args[0].strip_prefix('/') {
            if stripped.is_empty() {
                args.remove(0);
            } else {
                args[0] = stripped.to_string();
            }
            return args;
        }
        if self.context.is_root() || self.registry.is_domain(&args[0]) {
            return args;
        }

        let mut prefixed = Vec::with_capacity(args.len() + 2);
        prefixed.push(self.context.domain.clone());
        if !self.context.action.is_empty() {
            prefixed.push(self.context.action.clone());
        }
        prefixed.extend(args);
        prefixed
    }

    /// Append `-n <namespace>` to resource commands that do not name one.
    pub fn inject_namespace(&self, mut args: Vec<String>) -> Vec<String> {
        if self.namespace.is_empty() || explicit_namespace(&args).is_some() {
            return args;
        }
        if args.first().is_some_and(|first| self.registry.is_domain(first)) {
            args.push("-n".to_string());
            args.push(self.namespace.clone());
        }
        args
    }

    /// Completion for the text before byte offset `pos`.
    ///
    /// Returns where the replaced word starts and the candidates for it.
    pub fn complete_input(&self, line: &str, pos: usize) -> (usize, Vec<Candidate>) {
        let pos = pos.min(line.len());
        if !line.is_char_boundary(pos) {
            return (pos, Vec::new());
        }
        let before = &line[..pos];
        let (start, word) = current_word(before);
        let words = parse_input_args(&before[..start]);

        let cache = self.cache.get();
        let ctx = ProviderContext {
            registry: &self.registry,
            cache: &cache,
            namespace: explicit_namespace(&words),
            default_namespace: &self.namespace,
        };
        let candidates = self
            .providers_for(&words, word)
            .iter()
            .flat_map(|provider| provider.complete(&ctx, word).candidates)
            .collect();
        (start, candidates)
    }

    fn providers_for(&self, words: &[String], word: &str) -> Vec<Provider> {
        match words.last().map(String::as_str) {
            Some("-n" | "--namespace") => return vec![Provider::Namespaces],
            Some("-o" | "--output-format") => return vec![Provider::OutputFormats],
            Some("--label") => return vec![Provider::LabelKeys],
            Some("-f" | "--file") => return Vec::new(),
            _ => {}
        }
        if word.starts_with('-') {
            return vec![Provider::Words(FLAGS.to_vec())];
        }
        if let [only] = words {
            if self.builtins.resolve(only) == Some(Builtin::Namespace) {
                return vec![Provider::Namespaces];
            }
        }

        if words.is_empty() {
            return if self.context.is_root() {
                vec![Provider::Domains, Provider::Builtins(self.builtins.names())]
            } else if self.context.is_domain() {
                vec![Provider::Actions, Provider::Words(NAV_DOMAIN.to_vec())]
            } else {
                vec![
                    Provider::ResourceTypes(ResourceTypeCompleter::new(self.context.domain.clone())),
                    Provider::Words(NAV_ACTION.to_vec()),
                ]
            };
        }

        let full = self.prepend_context(words.to_vec());
        let positionals = positionals(&full);
        let Some(domain) = positionals.first().and_then(|d| self.registry.resolve_domain(d)) else {
            return Vec::new();
        };
        match positionals.len() {
            1 => vec![Provider::Actions],
            2 => vec![Provider::ResourceTypes(ResourceTypeCompleter::new(domain))],
            3 if NAMED_ACTIONS.contains(&positionals[1]) => {
                match self.registry.resource_type(domain, positionals[2]) {
                    Some(rt) => vec![Provider::ResourceNames(ResourceNameCompleter::new(domain, rt.name))],
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    /// Record an interrupt at `now`; a second one inside the window ends
    /// the session.
    pub fn handle_interrupt(&mut self, now: Instant) -> InterruptOutcome {
        let terminate = self
            .last_interrupt
            .is_some_and(|previous| now.saturating_duration_since(previous) < INTERRUPT_WINDOW);
        self.last_interrupt = Some(now);
        if terminate {
            InterruptOutcome::Terminate
        } else {
            self.console.println(&format!("\n{}", INTERRUPT_HINT));
            InterruptOutcome::Hint
        }
    }

    /// Persist history and say goodbye.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.history.save() {
            warn!(error = %e, "Could not save history");
            self.console
                .eprintln(&format!("Warning: could not save history: {}", e));
        }
        self.console.println(&format!("\n{}", FAREWELL));
    }
}

/// Value of `-n/--namespace` in `args`, if present.
pub fn explicit_namespace(args: &[String]) -> Option<&str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-n" | "--namespace" => return Some(iter.next().map(String::as_str).unwrap_or("")),
            other => {
                if let Some(value) = other
                    .strip_prefix("--namespace=")
                    .or_else(|| other.strip_prefix("-n="))
                {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Positional words, skipping flags and their values.
fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with('-') {
            out.push(arg.as_str());
        }
    }
    out
}
