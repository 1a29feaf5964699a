//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::infrastructure::config::{Config, StreamConfig};

/// Delay used by [`stream`]; small but non-zero so ordering is observable.
pub const TEST_RECONNECT_DELAY_MS: u64 = 50;

/// Fixed-delay stream config with a short delay.
pub fn stream() -> StreamConfig {
    StreamConfig {
        reconnect_delay_ms: TEST_RECONNECT_DELAY_MS,
        max_reconnect_delay_ms: TEST_RECONNECT_DELAY_MS,
        backoff_multiplier: 1.0,
        ..StreamConfig::default()
    }
}

/// Stream config with the production default delay (3 s). Pair with a
/// paused tokio clock.
pub fn default_stream() -> StreamConfig {
    StreamConfig::default()
}

/// Valid application config pointing at `base_url`.
pub fn app(base_url: &str) -> Config {
    let mut config = Config::default();
    config.control.base_url = base_url.to_string();
    config
}
