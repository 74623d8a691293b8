use super::*;

use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn falls_back_to_local_backend_when_unset() {
    let config = ClientConfig::from_lookup(None, lookup_from(&[])).expect("config");
    assert_eq!(config.base_url.as_str(), "http://localhost:7010/");
}

#[test]
fn reads_primary_env_var_before_alias() {
    let config = ClientConfig::from_lookup(
        None,
        lookup_from(&[
            (API_URL_ENV, "http://dashboard.internal:7010"),
            (API_URL_ENV_ALIAS, "http://alias.internal:7010"),
        ]),
    )
    .expect("config");
    assert_eq!(config.base_url.host_str(), Some("dashboard.internal"));
}

#[test]
fn blank_env_values_are_ignored() {
    let config = ClientConfig::from_lookup(
        None,
        lookup_from(&[(API_URL_ENV, "   "), (API_URL_ENV_ALIAS, "http://alias:9000")]),
    )
    .expect("config");
    assert_eq!(config.base_url.as_str(), "http://alias:9000/");
}

#[test]
fn explicit_override_wins_over_environment() {
    let config = ClientConfig::from_lookup(
        Some("https://override.example"),
        lookup_from(&[(API_URL_ENV, "http://env:7010")]),
    )
    .expect("config");
    assert_eq!(config.base_url.as_str(), "https://override.example/");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ClientConfig::new("not a url").expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
}

#[test]
fn rejects_non_http_scheme() {
    let err = ClientConfig::new("ftp://files.example").expect_err("must fail");
    assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
}

#[test]
fn default_headers_request_json() {
    let headers = default_headers();
    assert_eq!(headers[CONTENT_TYPE], "application/json");
    assert_eq!(headers[ACCEPT], "application/json");
}
