use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://www.instagram.com";
pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("GEOSWEEP_LOG_LEVEL", "info");

    let base_url = or_default("GEOSWEEP_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if base_url.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOSWEEP_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("GEOSWEEP_REQUEST_TIMEOUT_SECS", "5")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOSWEEP_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let user_agent = or_default("GEOSWEEP_USER_AGENT", DEFAULT_USER_AGENT);

    let max_concurrent_fetches = match lookup("GEOSWEEP_MAX_CONCURRENT_FETCHES") {
        Ok(raw) => parse_concurrency(&raw)?,
        Err(_) => default_concurrency(),
    };

    let cookie = lookup("GEOSWEEP_COOKIE")
        .ok()
        .filter(|c| !c.trim().is_empty());

    Ok(AppConfig {
        log_level,
        base_url,
        request_timeout_secs,
        user_agent,
        max_concurrent_fetches,
        cookie,
    })
}

fn parse_concurrency(raw: &str) -> Result<usize, ConfigError> {
    let value = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "GEOSWEEP_MAX_CONCURRENT_FETCHES".to_string(),
            reason: e.to_string(),
        })?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "GEOSWEEP_MAX_CONCURRENT_FETCHES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(value)
}

/// Default fan-out bound: host parallelism plus a few slots for I/O wait,
/// capped at 32.
#[must_use]
pub fn default_concurrency() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
    (cpus + 4).min(32)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
