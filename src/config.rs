//! Runtime configuration, read from `NOTES_*` environment variables.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_K: u32 = 10;
pub const DEFAULT_SEARCH_THRESHOLD: f64 = 0.4;
pub const DEFAULT_ASK_K: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the notes API. May carry a path prefix.
    pub api_url: Url,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub search_k: u32,
    pub search_threshold: f64,
    pub ask_k: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = validate_api_url(&get("NOTES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()))?;

        let bind_raw = get("NOTES_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse::<SocketAddr>().map_err(|e| ConfigError::InvalidValue {
            key: "NOTES_BIND_ADDR".to_string(),
            reason: format!("{}", e),
        })?;

        let timeout_secs: u64 = parse_or("NOTES_REQUEST_TIMEOUT_SECS", get("NOTES_REQUEST_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "NOTES_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let search_k: u32 = parse_or("NOTES_SEARCH_K", get("NOTES_SEARCH_K"), DEFAULT_SEARCH_K)?;
        let ask_k: u32 = parse_or("NOTES_ASK_K", get("NOTES_ASK_K"), DEFAULT_ASK_K)?;
        for (key, value) in [("NOTES_SEARCH_K", search_k), ("NOTES_ASK_K", ask_k)] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "must be a positive integer".to_string(),
                });
            }
        }

        let search_threshold: f64 = parse_or("NOTES_SEARCH_THRESHOLD", get("NOTES_SEARCH_THRESHOLD"), DEFAULT_SEARCH_THRESHOLD)?;
        if !(0.0..=1.0).contains(&search_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "NOTES_SEARCH_THRESHOLD".to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }

        Ok(Self {
            api_url,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            search_k,
            search_threshold,
            ask_k,
        })
    }

    /// Absolute URL for an API path such as `/notes/3`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.as_str().trim_end_matches('/'), path)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// The API base must be a plain http(s) origin plus optional path prefix.
pub fn validate_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("credentials must not be embedded in the URL"));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.search_k, 10);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = config_with(&[("NOTES_API_URL", "https://api.example.com/v1/")]).unwrap();
        assert_eq!(config.endpoint("/notes/3"), "https://api.example.com/v1/notes/3");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config_with(&[("NOTES_API_URL", "ftp://example.com")]),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            config_with(&[("NOTES_API_URL", "https://example.com/?x=1")]),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
        assert!(matches!(
            config_with(&[("NOTES_REQUEST_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config_with(&[("NOTES_SEARCH_THRESHOLD", "1.5")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            config_with(&[("NOTES_BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_with(&[("NOTES_SEARCH_K", "  ")]).unwrap();
        assert_eq!(config.search_k, DEFAULT_SEARCH_K);
    }
}
