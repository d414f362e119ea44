use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "MERCADEX_ENV"));
}

#[test]
fn build_app_config_uses_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should parse");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:3000/api/mercadona");
    assert_eq!(cfg.region, "08001");
    assert_eq!(cfg.inter_request_delay_ms, 200);
    assert_eq!(cfg.inter_request_delay(), Duration::from_millis(200));
    assert!(cfg.request_timeout_secs.is_none());
    assert!(cfg.request_timeout().is_none());
    assert_eq!(cfg.user_agent, "MercadonaScraper/1.0");
    assert_eq!(cfg.export_dir.to_string_lossy(), ".");
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.upstream_url, "https://tienda.mercadona.es/api");
}

#[test]
fn build_app_config_strips_trailing_slash_from_urls() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_API_BASE_URL", "http://localhost:8080/api/mercadona/");
    map.insert("MERCADEX_UPSTREAM_URL", "https://example.test/api/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://localhost:8080/api/mercadona");
    assert_eq!(cfg.upstream_url, "https://example.test/api");
}

#[test]
fn build_app_config_reads_request_timeout_when_set() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_REQUEST_TIMEOUT_SECS", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout(), Some(Duration::from_secs(15)));
}

#[test]
fn build_app_config_rejects_invalid_request_timeout() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCADEX_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(MERCADEX_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_inter_request_delay_override() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_INTER_REQUEST_DELAY_MS", "500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.inter_request_delay_ms, 500);
}

#[test]
fn build_app_config_rejects_invalid_inter_request_delay() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_INTER_REQUEST_DELAY_MS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCADEX_INTER_REQUEST_DELAY_MS"),
        "expected InvalidEnvVar(MERCADEX_INTER_REQUEST_DELAY_MS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCADEX_BIND_ADDR"),
        "expected InvalidEnvVar(MERCADEX_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_region() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_REGION", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MERCADEX_REGION"),
        "expected InvalidEnvVar(MERCADEX_REGION), got: {result:?}"
    );
}

#[test]
fn build_app_config_region_override() {
    let mut map = HashMap::new();
    map.insert("MERCADEX_REGION", "28001");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.region, "28001");
}
