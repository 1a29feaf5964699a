//! Control-plane service adapters.
//!
//! - [`client::ControlPlaneClient`] - HTTPS commands and health probe
//! - [`stream::ControlPlaneFeed`] - WebSocket status feed
//! - [`dto`] - wire formats shared by both

pub mod client;
pub mod dto;
pub mod stream;

pub use client::ControlPlaneClient;
pub use stream::ControlPlaneFeed;
