//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! Both contracts describe the control plane: a push feed for status and a
//! request/response channel for commands.

pub mod control;
pub mod feed;
