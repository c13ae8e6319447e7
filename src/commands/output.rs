//! Rendering API responses as json, yaml or a table.

use crate::error::ShellError;
use clap::ValueEnum;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Table,
}

/// Serialize `value` as pretty JSON or YAML. `Table` falls back to YAML.
pub fn render_document(value: &Value, format: OutputFormat) -> Result<String, ShellError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Table => {
            Ok(serde_yaml::to_string(value)?.trim_end().to_string())
        }
    }
}

/// Render a list response (`{"items": [...]}`).
pub fn render_list(value: &Value, format: OutputFormat, namespace: &str) -> Result<String, ShellError> {
    match format {
        OutputFormat::Table => Ok(list_table(value, namespace)),
        _ => render_document(value, format),
    }
}

fn item_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item.get("metadata")
        .and_then(|m| m.get(field))
        .or_else(|| item.get(field))
        .and_then(Value::as_str)
}

fn list_table(value: &Value, namespace: &str) -> String {
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    if items.is_empty() {
        return "No resources found.".to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Namespace"]);
    for item in items {
        table.add_row(vec![
            item_field(item, "name").unwrap_or("-").to_string(),
            item_field(item, "namespace").unwrap_or(namespace).to_string(),
        ]);
    }
    table.to_string()
}

/// Two-column table of counts, e.g. discovery results.
pub fn count_table(header: [&str; 2], rows: &[(String, String)]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(header.to_vec());
    for (key, value) in rows {
        table.add_row(vec![key.clone(), value.clone()]);
    }
    table.to_string()
}
