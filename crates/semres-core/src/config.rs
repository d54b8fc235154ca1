use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

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

    let service_url = or_default("SEMRES_SERVICE_URL", "http://localhost:5000");
    if service_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "SEMRES_SERVICE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let data_dir = PathBuf::from(or_default("SEMRES_DATA_DIR", "./.semres"));
    let log_level = or_default("SEMRES_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SEMRES_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SEMRES_USER_AGENT", "semres/0.1 (results-lookup)");

    Ok(AppConfig {
        service_url,
        data_dir,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}
