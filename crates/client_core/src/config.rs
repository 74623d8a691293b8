use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:7010";
pub const API_URL_ENV: &str = "DASHBOARD_API_URL";
pub const API_URL_ENV_ALIAS: &str = "APP__API_URL";

/// Immutable connection settings shared by every request of a [`crate::DashboardClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub default_headers: HeaderMap,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            default_headers: default_headers(),
        })
    }

    /// Reads the base url from the process environment, falling back to
    /// [`DEFAULT_API_URL`]. An explicit, non-blank `override_url` wins over both.
    pub fn resolve(override_url: Option<&str>) -> Result<Self, ConfigError> {
        Self::from_lookup(override_url, |name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(override_url: Option<&str>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (raw, source) = resolve_base_url(override_url, lookup);
        debug!(base_url = %raw, source, "resolved dashboard api base url");
        Self::new(&raw)
    }
}

fn resolve_base_url<F>(override_url: Option<&str>, lookup: F) -> (String, &'static str)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = override_url.filter(|value| !value.trim().is_empty()) {
        return (value.trim().to_string(), "override");
    }

    for name in [API_URL_ENV, API_URL_ENV_ALIAS] {
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => return (value.trim().to_string(), name),
            _ => {}
        }
    }

    (DEFAULT_API_URL.to_string(), "default")
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let value = raw.trim();
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::UnsupportedScheme {
            value: value.to_string(),
        });
    }

    Ok(url)
}

pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
