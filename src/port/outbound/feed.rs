//! Status feed port.
//!
//! A [`StatusFeed`] is one push subscription to the control plane. It knows
//! nothing about retrying: it connects once, yields events until the link
//! dies, and can be told to let go of its transport. Reconnection is the
//! application layer's job.

use async_trait::async_trait;

use crate::domain::SystemStatusSnapshot;
use crate::error::Error;

/// Events produced by a connected status feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A well-formed status push.
    Status(SystemStatusSnapshot),
    /// A message that could not be decoded. The feed remains usable.
    Malformed { reason: String },
    /// The server reported an error in-band; delivery on this link is over.
    Failed { reason: String },
    /// The link closed or broke.
    Disconnected { reason: String },
}

/// A single, non-reconnecting push subscription for system status.
#[async_trait]
pub trait StatusFeed: Send {
    /// Open the subscription.
    async fn connect(&mut self) -> Result<(), Error>;

    /// Wait for the next event.
    ///
    /// Returns `None` when the feed is not connected or the transport
    /// ended without a close frame.
    async fn next_event(&mut self) -> Option<FeedEvent>;

    /// Drop the transport. Safe to call when already disconnected.
    async fn disconnect(&mut self);

    /// Endpoint description for logs.
    fn endpoint(&self) -> &str;
}
