//! Outbound adapters (driven side).

pub mod control_plane;
