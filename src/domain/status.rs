//! Status snapshots and local connection state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::mode::OperatingMode;

/// One status push from the control plane.
///
/// Snapshots are transient: each one replaces the previous in memory and
/// none are retained or written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatusSnapshot {
    /// Whether the control plane considers itself healthy.
    pub healthy: bool,
    /// Current operating mode.
    pub mode: OperatingMode,
    /// Number of strategies currently running.
    #[serde(rename = "active_strategies")]
    pub active_strategy_count: u32,
}

impl SystemStatusSnapshot {
    #[must_use]
    pub fn new(healthy: bool, mode: OperatingMode, active_strategy_count: u32) -> Self {
        Self {
            healthy,
            mode,
            active_strategy_count,
        }
    }

    /// Convenience for [`OperatingMode::is_halted`].
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.mode.is_halted()
    }
}

/// Console-local view of the link to the control plane.
///
/// Never transmitted. Written by the status stream and the manual health
/// probe only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum ConnectionState {
    /// A subscription attempt is in progress.
    #[default]
    Connecting,
    /// Status pushes are arriving.
    Online,
    /// The feed is down or the service is unreachable.
    Disconnected,
    /// The last probe failed with a reportable error.
    Error(String),
}

impl ConnectionState {
    #[must_use]
    pub const fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// True for every state that should be flagged as degraded.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Disconnected | Self::Error(_))
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connecting => write!(f, "connecting"),
            Self::Online => write!(f, "online"),
            Self::Disconnected => write!(f, "disconnected"),
            Self::Error(detail) => write!(f, "error: {detail}"),
        }
    }
}
