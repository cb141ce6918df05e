//! Configuration loading for the conversion client.
//!
//! Values come from `.env`/environment; `AppPublicConfig` is the display-safe view.

use std::time::Duration;

use serde::Serialize;

use crate::plugins::history::DEFAULT_HISTORY_CAPACITY;

pub const DEV_BASE_URL: &str = "http://localhost:8001";
pub const PROD_BASE_URL: &str = "https://json-prompt-backend.onrender.com";
const MAX_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn default_base_url(self) -> &'static str {
        match self {
            Environment::Development => DEV_BASE_URL,
            Environment::Production => PROD_BASE_URL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: Environment,
    pub base_url: String,
    pub history_capacity: usize,
    /// Transport timeout; `None` leaves the HTTP client's default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            base_url: DEV_BASE_URL.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            request_timeout: None,
        }
    }
}

pub(crate) fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn parse_environment(raw: &str) -> Environment {
    match raw.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        _ => Environment::Development,
    }
}

impl AppConfig {
    /// Resolve configuration against an arbitrary key lookup.
    ///
    /// Reads:
    /// - `JSON_PROMPT_API_URL` (fallback: `API_BASE_URL`)
    /// - `JSON_PROMPT_ENV` (fallback: `APP_ENV`)
    /// - `JSON_PROMPT_HISTORY_CAPACITY`
    /// - `JSON_PROMPT_HTTP_TIMEOUT_MS`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = non_empty("JSON_PROMPT_ENV")
            .or_else(|| non_empty("APP_ENV"))
            .map(|v| parse_environment(&v))
            .unwrap_or(Environment::Development);

        let base_url = non_empty("JSON_PROMPT_API_URL")
            .or_else(|| non_empty("API_BASE_URL"))
            .map(|v| normalize_base_url(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| environment.default_base_url().to_string());

        let history_capacity = non_empty("JSON_PROMPT_HISTORY_CAPACITY")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_HISTORY_CAPACITY)
            .clamp(1, MAX_HISTORY_CAPACITY);

        let request_timeout = non_empty("JSON_PROMPT_HTTP_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis);

        Self {
            environment,
            base_url,
            history_capacity,
            request_timeout,
        }
    }

    pub fn public(&self) -> AppPublicConfig {
        AppPublicConfig {
            environment: self.environment,
            base_url: self.base_url.clone(),
            history_capacity: self.history_capacity,
            request_timeout_ms: self.request_timeout.map(|d| d.as_millis() as u64),
        }
    }
}

/// Load configuration from `.env`/environment.
pub fn load_app_config() -> AppConfig {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            log::warn!("Config: failed to read .env: {}", err);
        }
    }
    AppConfig::from_lookup(|key| std::env::var(key).ok())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPublicConfig {
    pub environment: Environment,
    pub base_url: String,
    pub history_capacity: usize,
    pub request_timeout_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.history_capacity, 5);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn test_production_profile() {
        let config = config_from(&[("APP_ENV", "Production")]);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.base_url, PROD_BASE_URL);

        let config = config_from(&[("JSON_PROMPT_ENV", "prod"), ("APP_ENV", "development")]);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_explicit_base_url_wins_and_is_normalized() {
        let config = config_from(&[
            ("JSON_PROMPT_ENV", "production"),
            ("JSON_PROMPT_API_URL", "  http://10.0.0.2:9000/// "),
        ]);
        assert_eq!(config.base_url, "http://10.0.0.2:9000");

        let config = config_from(&[("API_BASE_URL", "http://fallback:1/")]);
        assert_eq!(config.base_url, "http://fallback:1");
    }

    #[test]
    fn test_blank_base_url_is_unset() {
        let config = config_from(&[("JSON_PROMPT_API_URL", "   "), ("API_BASE_URL", "/")]);
        assert_eq!(config.base_url, DEV_BASE_URL);
    }

    #[test]
    fn test_capacity_parsing() {
        assert_eq!(config_from(&[("JSON_PROMPT_HISTORY_CAPACITY", "10")]).history_capacity, 10);
        assert_eq!(config_from(&[("JSON_PROMPT_HISTORY_CAPACITY", "0")]).history_capacity, 1);
        assert_eq!(config_from(&[("JSON_PROMPT_HISTORY_CAPACITY", "5000")]).history_capacity, 100);
        assert_eq!(config_from(&[("JSON_PROMPT_HISTORY_CAPACITY", "ten")]).history_capacity, 5);
    }

    #[test]
    fn test_timeout_parsing() {
        let config = config_from(&[("JSON_PROMPT_HTTP_TIMEOUT_MS", "1500")]);
        assert_eq!(config.request_timeout, Some(Duration::from_millis(1500)));
        assert!(config_from(&[("JSON_PROMPT_HTTP_TIMEOUT_MS", "0")]).request_timeout.is_none());
        assert!(config_from(&[("JSON_PROMPT_HTTP_TIMEOUT_MS", "-3")]).request_timeout.is_none());
    }

    #[test]
    fn test_public_view() {
        let config = config_from(&[("JSON_PROMPT_HTTP_TIMEOUT_MS", "250")]);
        let public = config.public();
        assert_eq!(public.base_url, config.base_url);
        assert_eq!(public.request_timeout_ms, Some(250));
    }
}
