use crate::app_config::AppConfig;
use crate::ConfigError;

/// Desktop Chrome user-agent attached to headed requests by default.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any `LOGOCRAWL_*` value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any `LOGOCRAWL_*` value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing logic, decoupled from the actual environment so
/// it can be tested with a pure `HashMap` lookup; no `set_var`/`remove_var`
/// needed. Every variable has a default, so an empty environment is valid.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let request_timeout_secs = parse_u64("LOGOCRAWL_REQUEST_TIMEOUT_SECS", "5")?;
    let user_agent = or_default("LOGOCRAWL_USER_AGENT", DEFAULT_USER_AGENT);
    let max_concurrent_domains = parse_usize("LOGOCRAWL_MAX_CONCURRENT_DOMAINS", "1")?;
    let output_dir = PathBuf::from(or_default("LOGOCRAWL_OUTPUT_DIR", "output"));
    let results_file = or_default("LOGOCRAWL_RESULTS_FILE", "output.csv");
    let metrics_file = or_default("LOGOCRAWL_METRICS_FILE", "metrics.csv");
    let log_level = or_default("LOGOCRAWL_LOG_LEVEL", "info");

    Ok(AppConfig {
        request_timeout_secs,
        user_agent,
        max_concurrent_domains,
        output_dir,
        results_file,
        metrics_file,
        log_level,
    })
}
