//! Status stream and reconnection configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status stream settings.
///
/// The defaults give a fixed three-second pause between subscription
/// attempts. A multiplier above 1.0 turns that into an exponential backoff
/// capped at `max_reconnect_delay_ms`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Path of the push endpoint, appended to the control-plane base URL.
    #[serde(default = "default_path")]
    pub path: String,
    /// Delay before the first resubscription after a failure (milliseconds).
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    /// Upper bound for the delay when a multiplier is configured (milliseconds).
    #[serde(default = "default_max_reconnect_delay_ms")]
    pub max_reconnect_delay_ms: u64,
    /// Multiplier applied to the delay after each consecutive failure.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Limit on a single subscription handshake (milliseconds). Expiry counts
    /// as a failed attempt.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

fn default_path() -> String {
    "/ws/status".into()
}

const fn default_reconnect_delay_ms() -> u64 {
    3_000
}

const fn default_max_reconnect_delay_ms() -> u64 {
    3_000
}

const fn default_backoff_multiplier() -> f64 {
    1.0
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl StreamConfig {
    #[must_use]
    pub const fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    #[must_use]
    pub const fn max_reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.max_reconnect_delay_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            max_reconnect_delay_ms: default_max_reconnect_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delay_is_fixed_three_seconds() {
        let config = StreamConfig::default();
        assert_eq!(config.reconnect_delay(), Duration::from_secs(3));
        assert_eq!(config.max_reconnect_delay(), Duration::from_secs(3));
        assert!((config.backoff_multiplier - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn partial_table_fills_defaults() {
        let config: StreamConfig = toml::from_str("reconnect_delay_ms = 500").unwrap();
        assert_eq!(config.reconnect_delay_ms, 500);
        assert_eq!(config.path, "/ws/status");
    }
}
