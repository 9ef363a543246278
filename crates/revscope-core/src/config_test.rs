use std::collections::HashMap;
use std::env::VarError;

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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "REVSCOPE_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let config = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");

    assert_eq!(config.env, Environment::Development);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:5000");
    assert_eq!(config.log_level, "info");
    assert_eq!(config.site_base_url, "https://www.yelp.com");
    assert_eq!(config.scraper_request_timeout_secs, 30);
    assert_eq!(config.scraper_inter_request_delay_ms, 250);
    assert_eq!(config.scraper_max_retries, 3);
    assert_eq!(config.scraper_retry_backoff_base_secs, 2);
    assert_eq!(config.friend_concurrency, 8);
    assert_eq!(config.sentiment_backend, SentimentBackend::Lexicon);
    assert!(config.google_language_api_key.is_none());
    assert_eq!(config.sentiment_request_timeout_secs, 10);
    assert_eq!(config.sentiment_max_retries, 3);
    assert_eq!(config.sentiment_retry_backoff_ms, 500);
}

#[test]
fn sentiment_timeout_is_independent_of_scraper_timeout() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS", "45");
    map.insert("REVSCOPE_SENTIMENT_REQUEST_TIMEOUT_SECS", "4");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.scraper_request_timeout_secs, 45);
    assert_eq!(config.sentiment_request_timeout_secs, 4);
}

#[test]
fn build_app_config_picks_google_when_key_present() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("GOOGLE_LANGUAGE_API_KEY", "abc123");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.sentiment_backend, SentimentBackend::Google);
    assert_eq!(config.google_language_api_key.as_deref(), Some("abc123"));
}

#[test]
fn build_app_config_blank_key_counts_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("GOOGLE_LANGUAGE_API_KEY", "   ");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.sentiment_backend, SentimentBackend::Lexicon);
    assert!(config.google_language_api_key.is_none());
}

#[test]
fn build_app_config_production_requires_key_or_explicit_lexicon() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "GOOGLE_LANGUAGE_API_KEY"),
        "expected MissingEnvVar(GOOGLE_LANGUAGE_API_KEY), got: {result:?}"
    );

    map.insert("REVSCOPE_SENTIMENT_BACKEND", "lexicon");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.sentiment_backend, SentimentBackend::Lexicon);
}

#[test]
fn build_app_config_explicit_google_without_key_fails() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_SENTIMENT_BACKEND", "google");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_unknown_backend() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_SENTIMENT_BACKEND", "vader");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSCOPE_SENTIMENT_BACKEND")
    );
}

#[test]
fn build_app_config_rejects_bad_bind_addr() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_BIND_ADDR", "not-an-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSCOPE_BIND_ADDR"),
        "expected InvalidEnvVar(REVSCOPE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_clamps_friend_concurrency() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_FRIEND_CONCURRENCY", "500");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.friend_concurrency, 30);

    map.insert("REVSCOPE_FRIEND_CONCURRENCY", "0");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(config.friend_concurrency, 1);
}

#[test]
fn build_app_config_rejects_non_numeric_retries() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("REVSCOPE_SCRAPER_MAX_RETRIES", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVSCOPE_SCRAPER_MAX_RETRIES")
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("GOOGLE_LANGUAGE_API_KEY", "super-secret-key");
    let config = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret-key"));
    assert!(debug.contains("[redacted]"));
}
