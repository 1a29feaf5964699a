//! Mock [`StatusFeed`] implementations for testing.
//!
//! - [`ScriptedFeed`] - pre-loaded connect results and events.
//!   Best for: reconnection logic, malformed-message handling, timing.
//! - [`ChannelFeed`] - channel-backed feed with an external control handle.
//!   Best for: integration tests needing on-demand event delivery.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::error::Result;
use crate::port::{FeedEvent, StatusFeed};

/// Shared counters describing how a feed was driven.
///
/// Clone it before handing the feed to a stream; all clones observe the
/// same values.
#[derive(Debug, Clone, Default)]
pub struct FeedProbe {
    connects: Arc<AtomicU32>,
    disconnects: Arc<AtomicU32>,
    connected: Arc<AtomicBool>,
    connect_times: Arc<Mutex<Vec<Instant>>>,
}

impl FeedProbe {
    /// How many times `connect()` was called (successful or not).
    pub fn connect_count(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    /// How many times a live transport was released.
    pub fn disconnect_count(&self) -> u32 {
        self.disconnects.load(Ordering::SeqCst)
    }

    /// Whether a transport is currently held.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Tokio instants of every `connect()` call, in order.
    pub fn connect_times(&self) -> Vec<Instant> {
        self.connect_times.lock().clone()
    }

    fn record_connect(&self, ok: bool) {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.connect_times.lock().push(Instant::now());
        self.connected.store(ok, Ordering::SeqCst);
    }

    fn record_disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.disconnects.fetch_add(1, Ordering::SeqCst);
        }
    }
}

// ---------------------------------------------------------------------------
// ScriptedFeed
// ---------------------------------------------------------------------------

/// A mock feed with scripted connect results and a fixed event queue.
///
/// Each `connect()` pops the next result (defaults to `Ok(())` when
/// exhausted). `next_event()` pops the next scripted entry; a `None` entry
/// simulates the transport ending. Once the script is exhausted the feed
/// goes quiet and blocks forever, like an idle connection.
pub struct ScriptedFeed {
    stalled_connects: u32,
    connect_results: VecDeque<Result<()>>,
    events: VecDeque<Option<FeedEvent>>,
    probe: FeedProbe,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self {
            stalled_connects: 0,
            connect_results: VecDeque::new(),
            events: VecDeque::new(),
            probe: FeedProbe::default(),
        }
    }

    pub fn with_connect_results(mut self, results: Vec<Result<()>>) -> Self {
        self.connect_results = results.into();
        self
    }

    /// The first `count` connects never complete, like a server that
    /// accepts the socket but never answers the handshake.
    pub fn with_stalled_connects(mut self, count: u32) -> Self {
        self.stalled_connects = count;
        self
    }

    pub fn with_events(mut self, events: Vec<Option<FeedEvent>>) -> Self {
        self.events = events.into();
        self
    }

    /// Shared probe for asserting connect/disconnect behaviour.
    pub fn probe(&self) -> FeedProbe {
        self.probe.clone()
    }
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusFeed for ScriptedFeed {
    async fn connect(&mut self) -> Result<()> {
        if self.stalled_connects > 0 {
            self.stalled_connects -= 1;
            self.probe.record_connect(false);
            std::future::pending::<()>().await;
        }
        let result = self.connect_results.pop_front().unwrap_or(Ok(()));
        self.probe.record_connect(result.is_ok());
        result
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        match self.events.pop_front() {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }

    async fn disconnect(&mut self) {
        self.probe.record_disconnect();
    }

    fn endpoint(&self) -> &str {
        "scripted://status"
    }
}

impl Drop for ScriptedFeed {
    fn drop(&mut self) {
        self.probe.record_disconnect();
    }
}

// ---------------------------------------------------------------------------
// ChannelFeed
// ---------------------------------------------------------------------------

/// A mock feed controlled externally via a [`ChannelFeedHandle`].
pub struct ChannelFeed {
    event_rx: tokio::sync::mpsc::Receiver<Option<FeedEvent>>,
    probe: FeedProbe,
}

/// Control handle for a [`ChannelFeed`].
pub struct ChannelFeedHandle {
    event_tx: tokio::sync::mpsc::Sender<Option<FeedEvent>>,
    probe: FeedProbe,
}

impl ChannelFeedHandle {
    /// Send an event to the feed.
    pub async fn send(&self, event: FeedEvent) {
        let _ = self.event_tx.send(Some(event)).await;
    }

    /// Simulate the transport ending (`next_event` returns `None`).
    pub async fn close(&self) {
        let _ = self.event_tx.send(None).await;
    }

    pub fn probe(&self) -> FeedProbe {
        self.probe.clone()
    }
}

/// Create a [`ChannelFeed`] and its control [`ChannelFeedHandle`].
pub fn channel_feed(buffer: usize) -> (ChannelFeed, ChannelFeedHandle) {
    let (tx, rx) = tokio::sync::mpsc::channel(buffer);
    let probe = FeedProbe::default();
    (
        ChannelFeed {
            event_rx: rx,
            probe: probe.clone(),
        },
        ChannelFeedHandle {
            event_tx: tx,
            probe,
        },
    )
}

#[async_trait]
impl StatusFeed for ChannelFeed {
    async fn connect(&mut self) -> Result<()> {
        self.probe.record_connect(true);
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        match self.event_rx.recv().await {
            Some(Some(event)) => Some(event),
            Some(None) => None,
            // Handle dropped: stay quiet rather than spin on reconnects.
            None => std::future::pending().await,
        }
    }

    async fn disconnect(&mut self) {
        self.probe.record_disconnect();
    }

    fn endpoint(&self) -> &str {
        "channel://status"
    }
}

impl Drop for ChannelFeed {
    fn drop(&mut self) {
        self.probe.record_disconnect();
    }
}
