use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_VENUE_API_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";

pub const DEFAULT_USER_AGENT: &str = "dopc/0.1 (delivery-price-calculator)";

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

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("DOPC_ENV", "development"));
    let log_level = or_default("DOPC_LOG_LEVEL", "info");

    let venue_api_base_url = or_default("DOPC_VENUE_API_BASE_URL", DEFAULT_VENUE_API_BASE_URL);
    if venue_api_base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "DOPC_VENUE_API_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("DOPC_REQUEST_TIMEOUT_SECS", "10")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DOPC_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than 0".to_string(),
        });
    }

    let user_agent = or_default("DOPC_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        env,
        log_level,
        venue_api_base_url,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
