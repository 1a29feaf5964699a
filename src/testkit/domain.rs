//! Builders for domain primitives used across tests.

use crate::domain::{OperatingMode, SystemStatusSnapshot};
use crate::port::FeedEvent;

/// Healthy snapshot with the given mode string and strategy count.
pub fn snapshot(mode: &str, active_strategies: u32) -> SystemStatusSnapshot {
    SystemStatusSnapshot::new(true, OperatingMode::parse(mode), active_strategies)
}

pub fn active_snapshot() -> SystemStatusSnapshot {
    snapshot("active", 3)
}

pub fn halted_snapshot() -> SystemStatusSnapshot {
    snapshot("halted", 0)
}

/// Wrap a snapshot in a [`FeedEvent::Status`].
pub fn status_event(mode: &str, active_strategies: u32) -> FeedEvent {
    FeedEvent::Status(snapshot(mode, active_strategies))
}

pub fn malformed_event(reason: &str) -> FeedEvent {
    FeedEvent::Malformed {
        reason: reason.to_string(),
    }
}

pub fn disconnect_event(reason: &str) -> FeedEvent {
    FeedEvent::Disconnected {
        reason: reason.to_string(),
    }
}

pub fn failed_event(reason: &str) -> FeedEvent {
    FeedEvent::Failed {
        reason: reason.to_string(),
    }
}
