//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] - Mock [`StatusFeed`](crate::port::StatusFeed)
//!   implementations: `ScriptedFeed`, `ChannelFeed`.
//! - [`control`] - Mock [`ControlPlane`](crate::port::ControlPlane):
//!   `ScriptedControlPlane`.
//! - [`domain`] - Builders for snapshots and feed events.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod control;
pub mod domain;
pub mod feed;
