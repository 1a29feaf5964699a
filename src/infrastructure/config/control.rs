//! Control-plane endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which command endpoint the console talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandEndpoint {
    /// `POST /api/v1/system/state`, halt and resume.
    #[default]
    Unified,
    /// `POST /api/v1/system/kill`, halt only. Deprecated.
    LegacyKill,
}

impl std::fmt::Display for CommandEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unified => write!(f, "unified"),
            Self::LegacyKill => write!(f, "legacy_kill"),
        }
    }
}

/// Control-plane HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ControlConfig {
    /// Base URL of the control-plane service (`https://...`).
    #[serde(default)]
    pub base_url: String,
    /// Bound on a single command or probe call (milliseconds).
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// TCP/TLS connect timeout (milliseconds).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default)]
    pub endpoint: CommandEndpoint,
}

const fn default_request_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl ControlConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout_ms: default_request_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            endpoint: CommandEndpoint::default(),
        }
    }
}

/// Operator identity attached to every command.
///
/// This is a placeholder string, not an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperatorConfig {
    #[serde(default = "default_operator_id")]
    pub id: String,
}

fn default_operator_id() -> String {
    "console-operator".into()
}

impl Default for OperatorConfig {
    fn default() -> Self {
        Self {
            id: default_operator_id(),
        }
    }
}
