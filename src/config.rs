//! Configuration management for secret-relay.
//!
//! Configuration is read once at startup from environment variables:
//! - `HTTP_PORT` - Required. Port the HTTP server listens on.
//! - `SECRETS_DIR` - Required. Directory scanned for secret files.
//! - `HTTP_HOST` - Optional. Listen address. Defaults to `0.0.0.0`.
//! - `LOG_FORMAT` - Optional. `text` or `json`. Defaults to `text`.

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const HTTP_PORT_ENV: &str = "HTTP_PORT";
pub const SECRETS_DIR_ENV: &str = "SECRETS_DIR";
pub const HTTP_HOST_ENV: &str = "HTTP_HOST";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}', expected 'text' or 'json'", other)),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Root of the mounted secrets tree
    pub secrets_dir: PathBuf,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `HTTP_PORT` or `SECRETS_DIR` is not set,
    /// and `ConfigError::InvalidValue` if a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string());
        let required =
            |name: &str| var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()));

        let port = required(HTTP_PORT_ENV)?
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidValue(HTTP_PORT_ENV.to_string(), format!("{}", e)))?;

        let secrets_dir = required(SECRETS_DIR_ENV)?;
        if secrets_dir.is_empty() {
            return Err(ConfigError::InvalidValue(
                SECRETS_DIR_ENV.to_string(),
                "path is empty".to_string(),
            ));
        }

        let host = var(HTTP_HOST_ENV)
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let log_format = match var(LOG_FORMAT_ENV).filter(|f| !f.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::InvalidValue(LOG_FORMAT_ENV.to_string(), e))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            host,
            port,
            secrets_dir: PathBuf::from(secrets_dir),
            log_format,
        })
    }

    /// Address the listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn parses_required_vars_with_defaults() {
        let config =
            Config::from_lookup(lookup(&[("HTTP_PORT", "8080"), ("SECRETS_DIR", "/secrets")]))
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.secrets_dir, PathBuf::from("/secrets"));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn optional_vars_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("HTTP_PORT", " 9000 "),
            ("SECRETS_DIR", "./mounted"),
            ("HTTP_HOST", "127.0.0.1"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn missing_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("SECRETS_DIR", "/secrets")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("HTTP_PORT".to_string()));
    }

    #[test]
    fn missing_secrets_dir_is_an_error() {
        let err = Config::from_lookup(lookup(&[("HTTP_PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingEnvVar("SECRETS_DIR".to_string()));
    }

    #[test]
    fn rejects_bad_ports() {
        for port in ["http", "-1", "65536", ""] {
            let err = Config::from_lookup(lookup(&[("HTTP_PORT", port), ("SECRETS_DIR", "/s")]))
                .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(ref name, _) if name == "HTTP_PORT"),
                "port {:?} gave {:?}",
                port,
                err
            );
        }
    }

    #[test]
    fn rejects_empty_secrets_dir() {
        let err = Config::from_lookup(lookup(&[("HTTP_PORT", "80"), ("SECRETS_DIR", "  ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "SECRETS_DIR"));
    }

    #[test]
    fn log_format_accepts_only_text_and_json() {
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("Json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert!("pretty".parse::<LogFormat>().is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = Config::from_lookup(lookup(&[
            ("HTTP_PORT", "80"),
            ("SECRETS_DIR", "/s"),
            ("LOG_FORMAT", "xml"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "LOG_FORMAT"));
    }
}
