use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> =
        pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert_eq!(
        cfg.timeouts,
        ClientTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg, ClientConfig::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("INVOICE_API_URL", "https://ap.example.test/"),
        ("INVOICE_REQUEST_TIMEOUT_SECS", "42"),
        ("INVOICE_CONNECT_TIMEOUT_SECS", "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://ap.example.test");
    assert_eq!(cfg.timeouts, ClientTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn from_lookup_ignores_bad_timeouts() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("INVOICE_REQUEST_TIMEOUT_SECS", "soon"),
        ("INVOICE_CONNECT_TIMEOUT_SECS", "0"),
    ]))
    .unwrap();
    assert_eq!(cfg.timeouts, ClientTimeouts::default());
}

#[test]
fn from_lookup_blank_url_uses_default() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("INVOICE_API_URL", "  ")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
}

#[test]
fn from_lookup_rejects_non_http_url() {
    let err = ClientConfig::from_lookup(lookup_from(&[("INVOICE_API_URL", "ftp://files")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBaseUrl("ftp://files".to_owned()));
}

#[test]
fn with_base_url_trims_trailing_slashes() {
    let cfg = ClientConfig::default().with_base_url("http://127.0.0.1:9000//").unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
}

#[test]
fn with_base_url_rejects_bare_scheme() {
    assert!(ClientConfig::default().with_base_url("http://").is_err());
}

#[test]
fn default_state_dir_ends_with_app_dir() {
    assert!(default_state_dir().ends_with(DEFAULT_STATE_DIR_NAME));
}
