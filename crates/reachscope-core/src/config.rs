use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the process environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
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

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("REACHSCOPE_ENV", "development"));
    let bind_addr = parse_addr("REACHSCOPE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("REACHSCOPE_LOG_LEVEL", "info");
    let accounts_path = PathBuf::from(or_default(
        "REACHSCOPE_ACCOUNTS_PATH",
        "./config/accounts.yaml",
    ));

    let apify_token = lookup("APIFY_TOKEN")
        .ok()
        .filter(|token| !token.trim().is_empty());
    let apify_actor = or_default("REACHSCOPE_APIFY_ACTOR", "apify~instagram-profile-scraper");

    let scraper_request_timeout_secs = parse_u64("REACHSCOPE_SCRAPER_REQUEST_TIMEOUT_SECS", "120")?;
    let scraper_user_agent = or_default(
        "REACHSCOPE_SCRAPER_USER_AGENT",
        "reachscope/0.1 (creator-analysis)",
    );
    let scraper_results_limit = parse_u32("REACHSCOPE_SCRAPER_RESULTS_LIMIT", "30")?;
    let scraper_max_concurrent_accounts =
        parse_usize("REACHSCOPE_SCRAPER_MAX_CONCURRENT_ACCOUNTS", "2")?;

    if scraper_max_concurrent_accounts == 0 {
        return Err(invalid(
            "REACHSCOPE_SCRAPER_MAX_CONCURRENT_ACCOUNTS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        accounts_path,
        apify_token,
        apify_actor,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_results_limit,
        scraper_max_concurrent_accounts,
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
