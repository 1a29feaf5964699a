//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all console settings.
//! Configuration is loaded from a TOML file; `HALTCTL_BASE_URL` and
//! `HALTCTL_OPERATOR` override the file when set.
//!
//! # Example
//!
//! ```no_run
//! use haltctl::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::control::{ControlConfig, OperatorConfig};
use super::logging::LoggingConfig;
use super::stream::StreamConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `control.base_url`.
pub const BASE_URL_ENV: &str = "HALTCTL_BASE_URL";

/// Environment variable overriding `operator.id`.
pub const OPERATOR_ENV: &str = "HALTCTL_OPERATOR";

/// Commented starting point written by `haltctl config init`.
pub const TEMPLATE: &str = r#"# haltctl configuration

[control]
# Control-plane service. The status feed URL is derived from it
# (https -> wss, http -> ws).
base_url = "https://control.example.com"
request_timeout_ms = 10000
connect_timeout_ms = 5000
# "unified" (halt + resume) or "legacy_kill" (halt only, deprecated)
endpoint = "unified"

[stream]
path = "/ws/status"
reconnect_delay_ms = 3000
max_reconnect_delay_ms = 3000
backoff_multiplier = 1.0
# Abandon a subscription handshake that takes longer than this.
connect_timeout_ms = 5000

[operator]
# Placeholder identity sent with every command. Not authenticated.
id = "console-operator"

[logging]
level = "info"
format = "pretty"
"#;

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub control: ControlConfig,

    #[serde(default)]
    pub stream: StreamConfig,

    #[serde(default)]
    pub operator: OperatorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from a TOML string, apply environment overrides
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Apply overrides from a key lookup (the process environment in
    /// production). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.control.base_url = base_url.trim().to_string();
        }
        if let Some(operator) = lookup(OPERATOR_ENV).filter(|v| !v.trim().is_empty()) {
            self.operator.id = operator.trim().to_string();
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first invalid or missing field found.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.control.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        let base = self.base_url()?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", base.scheme()),
            }
            .into());
        }
        if self.control.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.stream.reconnect_delay_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reconnect_delay_ms",
                reason: "must be greater than 0; immediate retry is not allowed".to_string(),
            }
            .into());
        }
        if self.stream.max_reconnect_delay_ms < self.stream.reconnect_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_reconnect_delay_ms",
                reason: "must be at least reconnect_delay_ms".to_string(),
            }
            .into());
        }
        if !self.stream.backoff_multiplier.is_finite() || self.stream.backoff_multiplier < 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                reason: "must be a finite number >= 1.0".to_string(),
            }
            .into());
        }
        if self.stream.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !self.stream.path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                field: "path",
                reason: "must start with '/'".to_string(),
            }
            .into());
        }
        if self.operator.id.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "operator.id" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Parsed control-plane base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `control.base_url` is not a valid URL.
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(self.control.base_url.trim())?)
    }

    /// WebSocket URL of the status feed, derived from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or uses a scheme other
    /// than `http`/`https`.
    pub fn status_url(&self) -> Result<Url> {
        let mut url = self.base_url()?;
        let scheme = match url.scheme() {
            "https" => "wss",
            "http" => "ws",
            other => {
                return Err(ConfigError::InvalidValue {
                    field: "base_url",
                    reason: format!("unsupported scheme '{other}'"),
                }
                .into())
            }
        };
        url.set_scheme(scheme).map_err(|()| ConfigError::InvalidValue {
            field: "base_url",
            reason: "cannot derive WebSocket URL".to_string(),
        })?;
        let path = format!("{}{}", url.path().trim_end_matches('/'), self.stream.path);
        url.set_path(&path);
        Ok(url)
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Other(format!("failed to render config: {e}")).into())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::control::CommandEndpoint;

    fn parse_without_env(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn template_is_valid() {
        let config = parse_without_env(TEMPLATE).unwrap();
        assert_eq!(config.control.endpoint, CommandEndpoint::Unified);
        assert_eq!(config.control.request_timeout_ms, 10_000);
    }

    #[test]
    fn missing_base_url_is_reported() {
        let result = parse_without_env("[operator]\nid = \"x\"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "base_url" }))
        ));
    }

    #[test]
    fn zero_reconnect_delay_is_rejected() {
        let result = parse_without_env(
            "[control]\nbase_url = \"https://cp.test\"\n[stream]\nreconnect_delay_ms = 0",
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "reconnect_delay_ms",
                ..
            }))
        ));
    }

    #[test]
    fn zero_stream_connect_timeout_is_rejected() {
        let result = parse_without_env(
            "[control]\nbase_url = \"https://cp.test\"\n[stream]\nconnect_timeout_ms = 0",
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "connect_timeout_ms",
                ..
            }))
        ));
    }

    #[test]
    fn status_url_follows_base_scheme() {
        let mut config = Config::default();
        config.control.base_url = "https://cp.test".into();
        assert_eq!(config.status_url().unwrap().as_str(), "wss://cp.test/ws/status");

        config.control.base_url = "http://127.0.0.1:8080/".into();
        assert_eq!(
            config.status_url().unwrap().as_str(),
            "ws://127.0.0.1:8080/ws/status"
        );
    }

    #[test]
    fn status_url_keeps_base_path_prefix() {
        let mut config = Config::default();
        config.control.base_url = "https://cp.test/ops".into();
        assert_eq!(
            config.status_url().unwrap().as_str(),
            "wss://cp.test/ops/ws/status"
        );
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.control.base_url = "https://file.test".into();
        config.apply_overrides(|key| match key {
            BASE_URL_ENV => Some("https://env.test".into()),
            OPERATOR_ENV => Some("night-desk".into()),
            _ => None,
        });

        assert_eq!(config.control.base_url, "https://env.test");
        assert_eq!(config.operator.id, "night-desk");
    }

    #[test]
    fn blank_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".into()));
        assert_eq!(config.operator.id, "console-operator");
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = parse_without_env(TEMPLATE).unwrap();
        let rendered = config.to_toml().unwrap();
        let reparsed = parse_without_env(&rendered).unwrap();
        assert_eq!(reparsed.control, config.control);
    }
}
