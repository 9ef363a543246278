use crate::app_config::{AppConfig, Environment, SentimentBackend};
use crate::types::FRIEND_SAMPLE_CAP;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
///
/// # Errors
///
/// Returns `ConfigError` if required vars are missing or values are invalid.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("REVSCOPE_ENV", "development"))?;

    let bind_addr = parse("REVSCOPE_BIND_ADDR", "0.0.0.0:5000")?;
    let log_level = or_default("REVSCOPE_LOG_LEVEL", "info");
    let site_base_url = or_default("REVSCOPE_SITE_BASE_URL", "https://www.yelp.com");

    let scraper_request_timeout_secs = parse_u64("REVSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "REVSCOPE_SCRAPER_USER_AGENT",
        "revscope/0.1 (profile-builder)",
    );
    let scraper_inter_request_delay_ms =
        parse_u64("REVSCOPE_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;
    let scraper_max_retries = parse_u32("REVSCOPE_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("REVSCOPE_SCRAPER_RETRY_BACKOFF_BASE_SECS", "2")?;

    let friend_concurrency =
        parse_usize("REVSCOPE_FRIEND_CONCURRENCY", "8")?.clamp(1, FRIEND_SAMPLE_CAP);

    let google_language_api_key = lookup("GOOGLE_LANGUAGE_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let sentiment_backend = resolve_sentiment_backend(
        lookup("REVSCOPE_SENTIMENT_BACKEND").ok().as_deref(),
        google_language_api_key.is_some(),
        &env,
    )?;
    let sentiment_base_url = or_default(
        "REVSCOPE_SENTIMENT_BASE_URL",
        "https://language.googleapis.com",
    );
    let sentiment_request_timeout_secs =
        parse_u64("REVSCOPE_SENTIMENT_REQUEST_TIMEOUT_SECS", "10")?;
    let sentiment_max_retries = parse_u32("REVSCOPE_SENTIMENT_MAX_RETRIES", "3")?;
    let sentiment_retry_backoff_ms = parse_u64("REVSCOPE_SENTIMENT_RETRY_BACKOFF_MS", "500")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        friend_concurrency,
        sentiment_backend,
        google_language_api_key,
        sentiment_base_url,
        sentiment_request_timeout_secs,
        sentiment_max_retries,
        sentiment_retry_backoff_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "REVSCOPE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Pick the sentiment backend.
///
/// An explicit `REVSCOPE_SENTIMENT_BACKEND` wins. Without one, a configured
/// Google key selects `google`; otherwise the offline lexicon is only allowed
/// outside production.
fn resolve_sentiment_backend(
    explicit: Option<&str>,
    has_api_key: bool,
    env: &Environment,
) -> Result<SentimentBackend, ConfigError> {
    match explicit.map(str::trim) {
        Some("google") if has_api_key => Ok(SentimentBackend::Google),
        Some("google") => Err(ConfigError::MissingEnvVar(
            "GOOGLE_LANGUAGE_API_KEY".to_string(),
        )),
        Some("lexicon") => Ok(SentimentBackend::Lexicon),
        Some(other) => Err(ConfigError::InvalidEnvVar {
            var: "REVSCOPE_SENTIMENT_BACKEND".to_string(),
            reason: format!("expected 'google' or 'lexicon', got '{other}'"),
        }),
        None if has_api_key => Ok(SentimentBackend::Google),
        None if *env == Environment::Production => Err(ConfigError::MissingEnvVar(
            "GOOGLE_LANGUAGE_API_KEY".to_string(),
        )),
        None => Ok(SentimentBackend::Lexicon),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
