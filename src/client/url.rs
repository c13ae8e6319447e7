//! Base URL handling and tenant extraction.

use reqwest::Url;

/// Tenant shown for loopback endpoints.
pub const LOCAL_TENANT: &str = "local";
/// Tenant shown when the URL cannot be parsed.
pub const UNKNOWN_TENANT: &str = "unknown";

/// Trim trailing slashes and a trailing `/api` segment.
///
/// Every request path already starts with `/api`, so a base URL configured
/// as `https://acme.console.ves.volterra.io/api/` must not double it.
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/api")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_string()
}

/// Tenant name from an API URL: the first host label.
///
/// `https://acme.console.ves.volterra.io` gives `acme`; loopback hosts give
/// [`LOCAL_TENANT`]; anything unparsable gives [`UNKNOWN_TENANT`].
pub fn extract_tenant(api_url: &str) -> String {
    let parsed = match Url::parse(api_url.trim()) {
        Ok(url) => url,
        Err(_) => return UNKNOWN_TENANT.to_string(),
    };
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return UNKNOWN_TENANT.to_string(),
    };
    if host == "localhost" || host == "127.0.0.1" || host == "[::1]" || host == "::1" {
        return LOCAL_TENANT.to_string();
    }
    host.split('.')
        .next()
        .filter(|label| !label.is_empty())
        .unwrap_or(UNKNOWN_TENANT)
        .to_string()
}
