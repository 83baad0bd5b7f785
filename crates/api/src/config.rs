//! Process configuration, read from the environment at startup.
//!
//! | Variable                 | Default   |
//! |--------------------------|-----------|
//! | `MEDITRACK_HOST`         | `0.0.0.0` |
//! | `MEDITRACK_PORT`         | `5000`    |
//! | `MEDITRACK_LOG_FORMAT`   | `json`    |
//! | `MEDITRACK_CORS_ORIGINS` | any       |
//!
//! `RUST_LOG` is read separately by the tracing subscriber.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::http::HeaderValue;
use thiserror::Error;

use meditrack_observability::{LogFormat, UnknownLogFormat};

pub const HOST_VAR: &str = "MEDITRACK_HOST";
pub const PORT_VAR: &str = "MEDITRACK_PORT";
pub const LOG_FORMAT_VAR: &str = "MEDITRACK_LOG_FORMAT";
pub const CORS_ORIGINS_VAR: &str = "MEDITRACK_CORS_ORIGINS";

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("MEDITRACK_HOST: invalid IP address '{0}'")]
    InvalidHost(String),

    #[error("MEDITRACK_PORT: invalid port '{0}'")]
    InvalidPort(String),

    #[error("MEDITRACK_LOG_FORMAT: {0}")]
    LogFormat(#[from] UnknownLogFormat),

    #[error("MEDITRACK_CORS_ORIGINS: invalid origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsPolicy {
    #[default]
    AnyOrigin,
    Origins(Vec<HeaderValue>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    pub cors: CorsPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_format: LogFormat::default(),
            cors: CorsPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get(HOST_VAR) {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        }

        if let Some(port) = get(PORT_VAR) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        if let Some(format) = get(LOG_FORMAT_VAR) {
            config.log_format = format.parse()?;
        }

        if let Some(origins) = get(CORS_ORIGINS_VAR) {
            config.cors = parse_origins(&origins)?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_origins(raw: &str) -> Result<CorsPolicy, ConfigError> {
    let mut origins = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|o| !o.is_empty()) {
        if origin == "*" {
            return Ok(CorsPolicy::AnyOrigin);
        }
        let value = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::InvalidCorsOrigin(origin.to_string()))?;
        origins.push(value);
    }
    Ok(CorsPolicy::Origins(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup(&[
            (HOST_VAR, "127.0.0.1"),
            (PORT_VAR, "8088"),
            (LOG_FORMAT_VAR, "pretty"),
            (CORS_ORIGINS_VAR, "http://localhost:5173, https://meditrack.example"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8088");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.cors,
            CorsPolicy::Origins(vec![
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("https://meditrack.example"),
            ])
        );
    }

    #[test]
    fn wildcard_origin_means_any() {
        let config = ApiConfig::from_lookup(lookup(&[(CORS_ORIGINS_VAR, "*")])).unwrap();
        assert_eq!(config.cors, CorsPolicy::AnyOrigin);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[(PORT_VAR, "  ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            ApiConfig::from_lookup(lookup(&[(PORT_VAR, "http")])).unwrap_err(),
            ConfigError::InvalidPort("http".to_string())
        );
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(HOST_VAR, "localhost")])),
            Err(ConfigError::InvalidHost(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(LOG_FORMAT_VAR, "xml")])),
            Err(ConfigError::LogFormat(_))
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(CORS_ORIGINS_VAR, "http://bad\norigin")])),
            Err(ConfigError::InvalidCorsOrigin(_))
        ));
    }
}
