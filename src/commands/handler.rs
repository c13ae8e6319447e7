//! Resource command dispatch
//!
//! A command line, after context prefixing, reads
//! `<domain> <action> [resource_type] [name] [flags]`. The domain and action
//! are matched by hand; the remainder is parsed with clap.

use super::output::{count_table, render_document, render_list, OutputFormat};
use crate::catalog::{Registry, ResourceTypeInfo};
use crate::client::ApiClient;
use crate::config::DEFAULT_NAMESPACE;
use crate::error::ShellError;
use crate::repl::context::ACTIONS;
use clap::Parser;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Executes fully-qualified resource commands.
pub trait CommandHandler: Send {
    /// Run `args` and return the text to print.
    fn run(&mut self, args: &[String]) -> Result<String, ShellError>;
}

/// Flags and positionals following `<domain> <action>`.
#[derive(Debug, Parser)]
#[command(name = "xcsh", no_binary_name = true, disable_version_flag = true)]
pub struct ActionArgs {
    /// Resource type within the domain
    pub resource_type: Option<String>,

    /// Resource name
    pub name: Option<String>,

    /// Namespace to operate in
    #[arg(short = 'n', long)]
    pub namespace: Option<String>,

    /// Output format
    #[arg(short = 'o', long = "output-format", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,

    /// Resource definition file (YAML or JSON)
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Label as key=value (repeatable); keys only for remove-labels
    #[arg(long = "label")]
    pub labels: Vec<String>,
}

/// A command line resolved against the registry.
#[derive(Debug)]
pub struct ResourceCommand {
    pub domain: &'static str,
    pub action: String,
    pub args: ActionArgs,
}

/// Outcome of parsing: either a command or clap's own help text.
#[derive(Debug)]
pub enum Parsed {
    Command(ResourceCommand),
    Help(String),
}

/// Resolve domain and action, then parse the rest.
pub fn parse_command(registry: &Registry, args: &[String]) -> Result<Parsed, ShellError> {
    let Some(first) = args.first() else {
        return Err(ShellError::Usage("empty command".to_string()));
    };
    let domain = registry
        .domain(first)
        .ok_or_else(|| ShellError::UnknownDomain(first.clone()))?;
    let action = args.get(1).ok_or_else(|| {
        ShellError::Usage(format!(
            "missing action for '{}'; expected one of: {}",
            domain.name,
            ACTIONS.join(", ")
        ))
    })?;
    if !ACTIONS.contains(&action.as_str()) {
        return Err(ShellError::Usage(format!(
            "unknown action '{}'; expected one of: {}",
            action,
            ACTIONS.join(", ")
        )));
    }

    match ActionArgs::try_parse_from(&args[2..]) {
        Ok(parsed) => Ok(Parsed::Command(ResourceCommand {
            domain: domain.name,
            action: action.clone(),
            args: parsed,
        })),
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayHelp => {
            Ok(Parsed::Help(e.to_string()))
        }
        Err(e) => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or("invalid arguments");
            Err(ShellError::Usage(
                first_line.trim_start_matches("error: ").to_string(),
            ))
        }
    }
}

/// Handler backed by the control plane API.
pub struct ApiHandler {
    client: Option<Arc<ApiClient>>,
    registry: Registry,
    runtime: Handle,
}

impl ApiHandler {
    pub fn new(client: Option<Arc<ApiClient>>, registry: Registry, runtime: Handle) -> Self {
        Self {
            client,
            registry,
            runtime,
        }
    }

    fn client(&self) -> Result<Arc<ApiClient>, ShellError> {
        self.client.clone().ok_or(ShellError::NotConfigured)
    }

    fn resource_type(
        &self,
        domain: &str,
        resource_type: Option<&str>,
    ) -> Result<&'static ResourceTypeInfo, ShellError> {
        let name = resource_type.ok_or_else(|| {
            ShellError::Usage(format!(
                "missing resource type; '{}' offers: {}",
                domain,
                self.registry.list_resource_types(domain).join(", ")
            ))
        })?;
        self.registry
            .resource_type(domain, name)
            .ok_or_else(|| ShellError::UnknownResourceType {
                domain: domain.to_string(),
                resource_type: name.to_string(),
            })
    }

    fn execute(&self, command: ResourceCommand) -> Result<String, ShellError> {
        let ResourceCommand {
            domain,
            action,
            args,
        } = command;
        let namespace = args
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        if action == "discover" {
            return self.discover(domain, args.resource_type.as_deref(), &namespace);
        }

        let rt = self.resource_type(domain, args.resource_type.as_deref())?;
        let client = self.client()?;
        info!(domain, action = %action, resource_type = rt.name, %namespace, "Running command");

        match action.as_str() {
            "list" => {
                let value = self.runtime.block_on(client.list_resources(rt, &namespace))?;
                render_list(&value, args.output_format, &namespace)
            }
            "get" => {
                let name = require_name(&args, &action)?;
                let value = self
                    .runtime
                    .block_on(client.get_resource(rt, &namespace, name))?;
                render_document(&value, args.output_format)
            }
            "status" => {
                let name = require_name(&args, &action)?;
                let value = self
                    .runtime
                    .block_on(client.get_resource(rt, &namespace, name))?;
                let status = value.get("status").cloned().unwrap_or(Value::Null);
                if status.is_null() {
                    Ok(format!("No status reported for {} '{}'", rt.name, name))
                } else {
                    render_document(&status, args.output_format)
                }
            }
            "create" => {
                let body = read_body(require_file(&args, &action)?)?;
                let name = body_name(&body).unwrap_or_default();
                self.runtime
                    .block_on(client.create_resource(rt, &namespace, &body))?;
                Ok(format!("Created {} '{}'", rt.name, name))
            }
            "replace" => {
                let body = read_body(require_file(&args, &action)?)?;
                let name = args
                    .name
                    .clone()
                    .or_else(|| body_name(&body))
                    .ok_or_else(|| missing_name(&action))?;
                self.runtime
                    .block_on(client.replace_resource(rt, &namespace, &name, &body))?;
                Ok(format!("Replaced {} '{}'", rt.name, name))
            }
            "apply" => {
                let body = read_body(require_file(&args, &action)?)?;
                let name = body_name(&body).ok_or_else(|| {
                    ShellError::Usage("apply needs metadata.name in the file".to_string())
                })?;
                self.runtime.block_on(async {
                    match client.get_resource(rt, &namespace, &name).await {
                        Ok(_) => {
                            client.replace_resource(rt, &namespace, &name, &body).await?;
                            Ok::<_, ShellError>(format!("Applied {} '{}' (replaced)", rt.name, name))
                        }
                        Err(ShellError::ApiError { status: 404, .. }) => {
                            client.create_resource(rt, &namespace, &body).await?;
                            Ok(format!("Applied {} '{}' (created)", rt.name, name))
                        }
                        Err(e) => Err(e),
                    }
                })
            }
            "patch" => {
                let name = require_name(&args, &action)?.to_string();
                let patch = read_body(require_file(&args, &action)?)?;
                self.update(&client, rt, &namespace, &name, |current| {
                    merge_patch(current, &patch);
                    Ok(())
                })?;
                Ok(format!("Patched {} '{}'", rt.name, name))
            }
            "delete" => {
                let name = require_name(&args, &action)?;
                self.runtime
                    .block_on(client.delete_resource(rt, &namespace, name))?;
                Ok(format!("Deleted {} '{}'", rt.name, name))
            }
            "add-labels" => {
                let name = require_name(&args, &action)?.to_string();
                let labels = parse_labels(&args.labels, true)?;
                self.update(&client, rt, &namespace, &name, |current| {
                    let map = labels_mut(current)?;
                    for (key, value) in &labels {
                        map.insert(key.clone(), Value::String(value.clone()));
                    }
                    Ok(())
                })?;
                Ok(format!("Added {} label(s) to {} '{}'", labels.len(), rt.name, name))
            }
            "remove-labels" => {
                let name = require_name(&args, &action)?.to_string();
                let labels = parse_labels(&args.labels, false)?;
                self.update(&client, rt, &namespace, &name, |current| {
                    let map = labels_mut(current)?;
                    for (key, _) in &labels {
                        map.remove(key);
                    }
                    Ok(())
                })?;
                Ok(format!("Removed {} label(s) from {} '{}'", labels.len(), rt.name, name))
            }
            other => Err(ShellError::Usage(format!("unsupported action '{}'", other))),
        }
    }

    /// Read-modify-replace of one resource.
    fn update(
        &self,
        client: &ApiClient,
        rt: &ResourceTypeInfo,
        namespace: &str,
        name: &str,
        modify: impl FnOnce(&mut Value) -> Result<(), ShellError>,
    ) -> Result<(), ShellError> {
        self.runtime.block_on(async {
            let mut current = client.get_resource(rt, namespace, name).await?;
            modify(&mut current)?;
            client.replace_resource(rt, namespace, name, &current).await?;
            Ok(())
        })
    }

    /// Instance counts for one resource type, or every type in the domain.
    fn discover(
        &self,
        domain: &str,
        resource_type: Option<&str>,
        namespace: &str,
    ) -> Result<String, ShellError> {
        let types: Vec<&'static ResourceTypeInfo> = match resource_type {
            Some(_) => vec![self.resource_type(domain, resource_type)?],
            None => self
                .registry
                .domain(domain)
                .map(|d| d.resource_types.iter().collect())
                .unwrap_or_default(),
        };
        let client = self.client()?;

        let rows = self.runtime.block_on(async {
            let mut rows = Vec::with_capacity(types.len());
            for rt in &types {
                let count = match client.list_resource_names(rt, namespace, None).await {
                    Ok(names) => names.len().to_string(),
                    Err(e) => {
                        warn!(resource_type = rt.name, error = %e, "Discovery failed");
                        "error".to_string()
                    }
                };
                rows.push((rt.name.to_string(), count));
            }
            rows
        });
        Ok(format!(
            "Discovered in {} (namespace {}):\n{}",
            domain,
            namespace,
            count_table(["Resource Type", "Count"], &rows)
        ))
    }
}

impl CommandHandler for ApiHandler {
    fn run(&mut self, args: &[String]) -> Result<String, ShellError> {
        match parse_command(&self.registry, args)? {
            Parsed::Help(text) => Ok(text),
            Parsed::Command(command) => self.execute(command),
        }
    }
}

fn missing_name(action: &str) -> ShellError {
    ShellError::Usage(format!("{} requires a resource name", action))
}

fn require_name<'a>(args: &'a ActionArgs, action: &str) -> Result<&'a str, ShellError> {
    args.name.as_deref().ok_or_else(|| missing_name(action))
}

fn require_file<'a>(args: &'a ActionArgs, action: &str) -> Result<&'a Path, ShellError> {
    args.file
        .as_deref()
        .ok_or_else(|| ShellError::Usage(format!("{} requires -f/--file", action)))
}

/// Parse a YAML or JSON resource file.
fn read_body(path: &Path) -> Result<Value, ShellError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ShellError::Usage(format!("cannot read {}: {}", path.display(), e))
    })?;
    Ok(serde_yaml::from_str(&content)?)
}

fn body_name(body: &Value) -> Option<String> {
    body.pointer("/metadata/name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// `key=value` pairs; with `require_value` false a bare key is accepted.
fn parse_labels(raw: &[String], require_value: bool) -> Result<Vec<(String, String)>, ShellError> {
    if raw.is_empty() {
        return Err(ShellError::Usage("at least one --label is required".to_string()));
    }
    raw.iter()
        .map(|label| match label.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
            None if !require_value && !label.is_empty() => Ok((label.clone(), String::new())),
            _ => Err(ShellError::Usage(format!("invalid label '{}'; expected key=value", label))),
        })
        .collect()
}

/// `metadata.labels` as a mutable map, created if absent or null.
fn labels_mut(resource: &mut Value) -> Result<&mut Map<String, Value>, ShellError> {
    fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Value {
        let value = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if value.is_null() {
            *value = Value::Object(Map::new());
        }
        value
    }

    resource
        .as_object_mut()
        .map(|root| object_entry(root, "metadata"))
        .and_then(Value::as_object_mut)
        .map(|metadata| object_entry(metadata, "labels"))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| {
            ShellError::SerializationError("resource metadata is not an object".to_string())
        })
}

/// JSON merge patch: objects merge recursively, `null` deletes, anything
/// else replaces.
fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            if value.is_null() {
                target_map.remove(key);
            } else {
                merge_patch(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_parse_resolves_alias_and_flags() {
        let registry = Registry::builtin();
        let parsed = parse_command(
            &registry,
            &words("lb get http_loadbalancer web -n prod -o json --label a=b"),
        )
        .unwrap();
        let Parsed::Command(command) = parsed else {
            panic!("expected command");
        };
        assert_eq!(command.domain, "load_balancer");
        assert_eq!(command.action, "get");
        assert_eq!(command.args.resource_type.as_deref(), Some("http_loadbalancer"));
        assert_eq!(command.args.name.as_deref(), Some("web"));
        assert_eq!(command.args.namespace.as_deref(), Some("prod"));
        assert_eq!(command.args.output_format, OutputFormat::Json);
        assert_eq!(command.args.labels, vec!["a=b"]);
    }

    #[test]
    fn test_parse_errors_are_usage() {
        let registry = Registry::builtin();
        for line in ["cdn", "cdn explode", "cdn list --nope"] {
            let err = parse_command(&registry, &words(line)).unwrap_err();
            assert!(matches!(err, ShellError::Usage(_)), "{}: {:?}", line, err);
        }
        let err = parse_command(&registry, &words("bogus list")).unwrap_err();
        assert!(matches!(&err, ShellError::UnknownDomain(d) if d == "bogus"));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_parse_help() {
        let registry = Registry::builtin();
        let parsed = parse_command(&registry, &words("cdn list --help")).unwrap();
        assert!(matches!(parsed, Parsed::Help(text) if text.contains("--namespace")));
    }

    #[test]
    fn test_unconfigured_handler() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut handler = ApiHandler::new(None, Registry::builtin(), runtime.handle().clone());
        let err = handler.run(&words("cdn list certificate")).unwrap_err();
        assert!(matches!(err, ShellError::NotConfigured));
        let err = handler.run(&words("cdn list widget")).unwrap_err();
        assert!(matches!(err, ShellError::UnknownResourceType { .. }));
    }

    #[test]
    fn test_merge_patch() {
        let mut target = json!({"metadata": {"name": "web", "labels": {"a": "1"}}, "spec": {"port": 80}});
        merge_patch(&mut target, &json!({"metadata": {"labels": {"a": null, "b": "2"}}, "spec": {"port": 443}}));
        assert_eq!(
            target,
            json!({"metadata": {"name": "web", "labels": {"b": "2"}}, "spec": {"port": 443}})
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            parse_labels(&["env=prod".to_string()], true).unwrap(),
            vec![("env".to_string(), "prod".to_string())]
        );
        assert!(parse_labels(&["env".to_string()], true).is_err());
        assert!(parse_labels(&["env".to_string()], false).is_ok());
        assert!(parse_labels(&[], false).is_err());

        let mut resource = json!({"metadata": {"name": "web"}});
        labels_mut(&mut resource)
            .unwrap()
            .insert("tier".to_string(), json!("frontend"));
        assert_eq!(resource.pointer("/metadata/labels/tier"), Some(&json!("frontend")));
        assert!(labels_mut(&mut json!("scalar")).is_err());
    }
}
