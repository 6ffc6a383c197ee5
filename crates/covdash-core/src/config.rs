use crate::app_config::AppConfig;
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
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let city = require("COVDASH_CITY")?;
    let news_api_key = require("NEWS_API_KEY")?;

    let dashboard_title = or_default("COVDASH_TITLE", "Covid Dashboard");
    let nation = or_default("COVDASH_NATION", "United Kingdom");
    let news_terms = or_default("COVDASH_NEWS_TERMS", "Covid COVID-19 coronavirus");
    let bind_addr = parse_addr("COVDASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("COVDASH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("COVDASH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("COVDASH_USER_AGENT", "covdash/0.1 (scheduled-dashboard)");

    Ok(AppConfig {
        city,
        dashboard_title,
        nation,
        news_api_key,
        news_terms,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
mod tests {
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

    /// Returns a map with all required env vars populated with valid values.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("COVDASH_CITY", "Exeter");
        m.insert("NEWS_API_KEY", "test-key");
        m
    }

    #[test]
    fn build_app_config_fails_without_city() {
        let mut map = full_env();
        map.remove("COVDASH_CITY");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "COVDASH_CITY"),
            "expected MissingEnvVar(COVDASH_CITY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_without_news_api_key() {
        let mut map = full_env();
        map.remove("NEWS_API_KEY");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "NEWS_API_KEY"),
            "expected MissingEnvVar(NEWS_API_KEY), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_bind_addr() {
        let mut map = full_env();
        map.insert("COVDASH_BIND_ADDR", "not-a-socket-addr");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COVDASH_BIND_ADDR"),
            "expected InvalidEnvVar(COVDASH_BIND_ADDR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = full_env();
        map.insert("COVDASH_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "COVDASH_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(COVDASH_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_applies_defaults() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.city, "Exeter");
        assert_eq!(cfg.dashboard_title, "Covid Dashboard");
        assert_eq!(cfg.nation, "United Kingdom");
        assert_eq!(cfg.news_terms, "Covid COVID-19 coronavirus");
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.request_timeout_secs, 30);
    }

    #[test]
    fn build_app_config_honours_overrides() {
        let mut map = full_env();
        map.insert("COVDASH_TITLE", "South West Covid");
        map.insert("COVDASH_BIND_ADDR", "127.0.0.1:8080");
        map.insert("COVDASH_REQUEST_TIMEOUT_SECS", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.dashboard_title, "South West Covid");
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(cfg.request_timeout_secs, 5);
    }

    #[test]
    fn debug_redacts_news_api_key() {
        let map = full_env();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("test-key"), "key leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }
}
