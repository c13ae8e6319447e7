//! Control plane HTTP client
//!
//! Thin reqwest wrapper over the configuration API. Every request carries
//! `Authorization: APIToken <token>` when a token is configured, and every
//! non-2xx response becomes [`ShellError::ApiError`].

pub mod url;

pub use url::{extract_tenant, normalize_api_url};

use crate::catalog::{Registry, ResourceTypeInfo};
use crate::completion::CompletionSource;
use crate::error::ShellError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default per-request timeout for command traffic.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct NamespaceList {
    #[serde(default)]
    items: Vec<NamespaceItem>,
}

#[derive(Debug, Deserialize)]
struct NamespaceItem {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct ResourceList {
    #[serde(default)]
    items: Vec<ResourceItem>,
}

#[derive(Debug, Deserialize)]
struct ResourceItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    metadata: Option<ResourceMetadata>,
}

#[derive(Debug, Deserialize)]
struct ResourceMetadata {
    #[serde(default)]
    name: Option<String>,
}

impl ResourceItem {
    fn into_name(self) -> Option<String> {
        self.metadata
            .and_then(|m| m.name)
            .or(self.name)
            .filter(|n| !n.is_empty())
    }
}

/// Client for the control plane API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    registry: Registry,
}

impl ApiClient {
    /// Build a client for `api_url`, authenticating with `token` if given.
    pub fn new(api_url: &str, token: Option<&str>) -> Result<Self, ShellError> {
        let base_url = normalize_api_url(api_url);
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(ShellError::ConfigError(format!(
                "Invalid API URL: {}",
                api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("APIToken {}", token)).map_err(|_| {
                ShellError::ConfigError("API token contains invalid characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            registry: Registry::builtin(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a resource type, or fail with a usage-level error.
    pub fn resource_type(
        &self,
        domain: &str,
        resource_type: &str,
    ) -> Result<&'static ResourceTypeInfo, ShellError> {
        self.registry
            .resource_type(domain, resource_type)
            .ok_or_else(|| ShellError::UnknownResourceType {
                domain: domain.to_string(),
                resource_type: resource_type.to_string(),
            })
    }

    #[instrument(skip(self, body), fields(base = %self.base_url))]
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
        timeout: Option<Duration>,
    ) -> Result<Value, ShellError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "API request");

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let budget = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(e, budget))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, budget))?;
        debug!(status = status.as_u16(), bytes = text.len(), "API response");

        if !status.is_success() {
            return Err(ShellError::ApiError {
                status: status.as_u16(),
                message: api_error_message(&text, status.canonical_reason()),
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Names of all namespaces visible to the token.
    pub async fn list_namespaces(&self, timeout: Option<Duration>) -> Result<Vec<String>, ShellError> {
        let body = self
            .request(Method::GET, "/api/web/namespaces", &[], None, timeout)
            .await?;
        let list: NamespaceList = serde_json::from_value(body)?;
        Ok(list
            .items
            .into_iter()
            .map(|item| item.name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    /// Full list response for a resource type.
    pub async fn list_resources(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
    ) -> Result<Value, ShellError> {
        let path = resource_type.collection_path(namespace);
        self.request(Method::GET, &path, &[], None, None).await
    }

    /// Instance names only, using the lightweight `select=metadata.name` query.
    pub async fn list_resource_names(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
        timeout: Option<Duration>,
    ) -> Result<Vec<String>, ShellError> {
        let path = resource_type.collection_path(namespace);
        let body = self
            .request(Method::GET, &path, &[("select", "metadata.name")], None, timeout)
            .await?;
        let list: ResourceList = serde_json::from_value(body)?;
        Ok(list
            .items
            .into_iter()
            .filter_map(ResourceItem::into_name)
            .collect())
    }

    pub async fn get_resource(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
        name: &str,
    ) -> Result<Value, ShellError> {
        let path = item_path(resource_type, namespace, name);
        self.request(Method::GET, &path, &[], None, None).await
    }

    pub async fn create_resource(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
        body: &Value,
    ) -> Result<Value, ShellError> {
        let path = resource_type.collection_path(namespace);
        self.request(Method::POST, &path, &[], Some(body), None).await
    }

    pub async fn replace_resource(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
        name: &str,
        body: &Value,
    ) -> Result<Value, ShellError> {
        let path = item_path(resource_type, namespace, name);
        self.request(Method::PUT, &path, &[], Some(body), None).await
    }

    pub async fn delete_resource(
        &self,
        resource_type: &ResourceTypeInfo,
        namespace: &str,
        name: &str,
    ) -> Result<Value, ShellError> {
        let path = item_path(resource_type, namespace, name);
        self.request(Method::DELETE, &path, &[], None, None).await
    }
}

/// Timeouts carry the budget that ran out; everything else is an HTTP error.
fn transport_error(err: reqwest::Error, budget: Duration) -> ShellError {
    if err.is_timeout() {
        ShellError::Timeout(budget.as_millis() as u64)
    } else {
        err.into()
    }
}

fn item_path(resource_type: &ResourceTypeInfo, namespace: &str, name: &str) -> String {
    format!("{}/{}", resource_type.collection_path(namespace), name)
}

/// Prefer the API's own `message` field over the raw body.
fn api_error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        reason.unwrap_or("request failed").to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl CompletionSource for ApiClient {
    async fn fetch_namespaces(&self, timeout: Duration) -> Result<Vec<String>, ShellError> {
        self.list_namespaces(Some(timeout)).await
    }

    async fn fetch_resource_instances(
        &self,
        domain: &str,
        resource_type: &str,
        namespace: &str,
        timeout: Duration,
    ) -> Result<Vec<String>, ShellError> {
        let info = self.resource_type(domain, resource_type)?;
        self.list_resource_names(info, namespace, Some(timeout)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_base_url() {
        let client = ApiClient::new("https://acme.console.ves.volterra.io/api/", Some("tok")).unwrap();
        assert_eq!(client.base_url(), "https://acme.console.ves.volterra.io");
        assert_eq!(extract_tenant(client.base_url()), "acme");
    }

    #[test]
    fn test_new_rejects_bad_url() {
        assert!(matches!(
            ApiClient::new("::nope::", None),
            Err(ShellError::ConfigError(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_token() {
        assert!(ApiClient::new("https://acme.example.com", Some("bad\ntoken")).is_err());
    }

    #[test]
    fn test_resource_item_name_sources() {
        let list: ResourceList = serde_json::from_str(
            r#"{"items":[{"metadata":{"name":"a"}},{"name":"b"},{"metadata":{}},{}]}"#,
        )
        .unwrap();
        let names: Vec<String> = list.items.into_iter().filter_map(ResourceItem::into_name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(r#"{"code":7,"message":"permission denied"}"#, Some("Forbidden")),
            "permission denied"
        );
        assert_eq!(api_error_message("", Some("Not Found")), "Not Found");
        assert_eq!(api_error_message("boom", None), "boom");
    }

    #[test]
    fn test_silent_server_times_out() {
        if ["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"]
            .iter()
            .any(|var| std::env::var(var).is_ok())
        {
            return;
        }
        // Accepted by the kernel backlog, never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let client = ApiClient::new(&url, None).unwrap();
        let runtime = tokio::runtime::Runtime::new().unwrap();

        let result = runtime.block_on(client.list_namespaces(Some(Duration::from_millis(150))));
        assert!(matches!(result, Err(ShellError::Timeout(150))), "{:?}", result);
        assert_eq!(ShellError::Timeout(150).exit_code(), 1);
        drop(listener);
    }

    #[test]
    fn test_unknown_resource_type() {
        let client = ApiClient::new("https://acme.example.com", None).unwrap();
        assert!(matches!(
            client.resource_type("cdn", "widget"),
            Err(ShellError::UnknownResourceType { .. })
        ));
        assert!(client.resource_type("cdn", "certificate").is_ok());
    }
}
