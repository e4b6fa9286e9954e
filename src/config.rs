// src/config.rs
use reqwest::Url;
use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/chat";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_VIEWPORT: usize = 40;

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub log_filter: String,
    pub viewport: usize,
}

impl Config {
    /// Load `.env` if there is one, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let endpoint = match read("CHAT_API_URL") {
            Some(raw) => parse_endpoint(&raw)?,
            None => parse_endpoint(DEFAULT_ENDPOINT)?,
        };

        let log_filter = read("CHAT_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let viewport = match read("CHAT_VIEWPORT") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidViewport(raw)),
            },
            None => DEFAULT_VIEWPORT,
        };

        Ok(Self { endpoint, log_filter, viewport })
    }

    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_filter).map_err(|source| ConfigError::InvalidLogFilter {
            value: self.log_filter.clone(),
            source,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidEndpoint {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.log_filter, "warn");
        assert_eq!(cfg.viewport, DEFAULT_VIEWPORT);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            ("CHAT_API_URL", "https://homes.example.com/api/chat"),
            ("CHAT_LOG", "real_estate_chat=debug"),
            ("CHAT_VIEWPORT", "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.endpoint.host_str(), Some("homes.example.com"));
        assert_eq!(cfg.viewport, 12);
        assert!(cfg.env_filter().is_ok());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = Config::from_lookup(lookup(&[("CHAT_API_URL", "   ")])).unwrap();
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("CHAT_API_URL", "not a url")])),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("CHAT_API_URL", "ftp://example.com/chat")])),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("CHAT_VIEWPORT", "0")])),
            Err(ConfigError::InvalidViewport(_))
        ));
    }
}
