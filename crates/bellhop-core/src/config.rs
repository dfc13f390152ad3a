use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let client_id = require("SABRE_CLIENT_ID")?;
    let client_secret = require("SABRE_CLIENT_SECRET")?;

    let env = parse_environment(&or_default("BELLHOP_ENV", "cert"));
    let base_url = lookup("SABRE_BASE_URL")
        .unwrap_or_else(|_| env.default_base_url().to_string());

    let epr_user = lookup("SABRE_EPR_USER").ok();
    let pcc = lookup("SABRE_PCC").ok();
    let aaa_domain = lookup("SABRE_AAA_DOMAIN").ok();
    let password = lookup("SABRE_PASSWORD").ok();

    let log_level = or_default("BELLHOP_LOG_LEVEL", "info");
    let user_agent = or_default("BELLHOP_USER_AGENT", "bellhop/0.1 (hotel-search)");

    let search_timeout_secs = parse_u64("BELLHOP_SEARCH_TIMEOUT_SECS", "10")?;
    let auth_timeout_secs = parse_u64("BELLHOP_AUTH_TIMEOUT_SECS", "5")?;
    let probe_delay_ms = parse_u64("BELLHOP_PROBE_DELAY_MS", "1000")?;
    let verify_failure_threshold = parse_u32("BELLHOP_VERIFY_FAILURE_THRESHOLD", "3")?;

    Ok(AppConfig {
        env,
        base_url,
        client_id,
        client_secret,
        epr_user,
        pcc,
        aaa_domain,
        password,
        log_level,
        user_agent,
        search_timeout_secs,
        auth_timeout_secs,
        probe_delay_ms,
        verify_failure_threshold,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Cert` — pointing misconfigured
/// processes at the certification environment is the safe failure mode.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        _ => Environment::Cert,
    }
}
