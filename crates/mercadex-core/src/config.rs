use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so only malformed values fail.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("MERCADEX_ENV", "development"))?;
    let log_level = or_default("MERCADEX_LOG_LEVEL", "info");

    let api_base_url = or_default(
        "MERCADEX_API_BASE_URL",
        "http://127.0.0.1:3000/api/mercadona",
    )
    .trim_end_matches('/')
    .to_string();

    let region = or_default("MERCADEX_REGION", "08001");
    if region.trim().is_empty() {
        return Err(invalid("MERCADEX_REGION", "must not be empty".into()));
    }

    let inter_request_delay_ms = parse_u64("MERCADEX_INTER_REQUEST_DELAY_MS", "200")?;

    let request_timeout_secs = match lookup("MERCADEX_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("MERCADEX_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("MERCADEX_USER_AGENT", "MercadonaScraper/1.0");
    let export_dir = PathBuf::from(or_default("MERCADEX_EXPORT_DIR", "."));

    let bind_addr = or_default("MERCADEX_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("MERCADEX_BIND_ADDR", e.to_string()))?;

    let upstream_url = or_default("MERCADEX_UPSTREAM_URL", "https://tienda.mercadona.es/api")
        .trim_end_matches('/')
        .to_string();

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        region,
        inter_request_delay_ms,
        request_timeout_secs,
        user_agent,
        export_dir,
        bind_addr,
        upstream_url,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MERCADEX_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
