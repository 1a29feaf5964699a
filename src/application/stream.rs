//! Reconnecting status stream.
//!
//! [`StatusStream`] wraps a single-shot [`StatusFeed`] and turns it into an
//! endless sequence of [`SystemStatusSnapshot`]s. Failures never reach the
//! consumer; they show up only on the connection indicator.
//!
//! ```text
//!   ┌────────────┐ connected ┌───────────┐
//!   │ Connecting ├──────────►│ Streaming │──► snapshot (Online)
//!   └─────▲──────┘           └─────┬─────┘
//!         │  connect failed,       │ error frame, close,
//!         │  handshake timeout     │ transport failure
//!         │      ┌─────────┐       │
//!         └──────┤ Backoff │◄──────┘
//!          delay └─────────┘ (Disconnected, or Error for error frames)
//! ```
//!
//! Each subscription attempt is bounded by the configured handshake
//! timeout, so a server that accepts the socket and then goes silent still
//! ends up in `Backoff`.
//!
//! There is no terminal state. The loop only stops when its consumer stops
//! polling it or cancels the task returned by [`StatusStream::spawn`].

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::Stream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use super::state::ConnectionObserver;
use crate::domain::{ConnectionState, SystemStatusSnapshot};
use crate::infrastructure::config::StreamConfig;
use crate::port::{FeedEvent, StatusFeed};

/// Position of the stream in its reconnect cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// About to open (or opening) a subscription.
    Connecting,
    /// Subscribed and waiting for pushes.
    Streaming,
    /// Waiting out the delay before the next subscription attempt.
    Backoff,
}

/// Endless, self-healing subscription to the control-plane status feed.
pub struct StatusStream<F: StatusFeed> {
    /// The underlying feed being wrapped.
    feed: F,
    config: StreamConfig,
    phase: StreamPhase,
    observer: Option<Arc<dyn ConnectionObserver>>,
    connection: ConnectionState,
    /// Total subscription attempts since construction.
    connect_attempts: u64,
    /// Failures since the last delivered snapshot.
    consecutive_failures: u32,
    current_delay: Duration,
    /// State published when the pending backoff starts.
    backoff_state: ConnectionState,
}

impl<F: StatusFeed> StatusStream<F> {
    /// Create a stream around `feed`. Nothing happens until the first call
    /// to [`next_snapshot`](Self::next_snapshot).
    pub fn new(feed: F, config: StreamConfig) -> Self {
        let current_delay = config.reconnect_delay();
        Self {
            feed,
            config,
            phase: StreamPhase::Connecting,
            observer: None,
            connection: ConnectionState::Connecting,
            connect_attempts: 0,
            consecutive_failures: 0,
            current_delay,
            backoff_state: ConnectionState::Disconnected,
        }
    }

    /// Report connection changes to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ConnectionObserver>) -> Self {
        observer.connection_changed(self.connection.clone());
        self.observer = Some(observer);
        self
    }

    pub fn set_observer(&mut self, observer: Arc<dyn ConnectionObserver>) {
        observer.connection_changed(self.connection.clone());
        self.observer = Some(observer);
    }

    #[must_use]
    pub const fn phase(&self) -> StreamPhase {
        self.phase
    }

    #[must_use]
    pub const fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    #[must_use]
    pub const fn connect_attempts(&self) -> u64 {
        self.connect_attempts
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.feed.endpoint()
    }

    fn publish(&mut self, state: ConnectionState) {
        if self.connection == state {
            return;
        }
        debug!(connection = %state, "Connection state changed");
        self.connection = state.clone();
        if let Some(observer) = &self.observer {
            observer.connection_changed(state);
        }
    }

    /// Delay for the upcoming backoff. Fixed unless a multiplier above 1.0
    /// is configured, in which case it grows up to the configured maximum.
    fn next_delay(&mut self) -> Duration {
        let delay = self.current_delay;
        let multiplier = if self.config.backoff_multiplier.is_finite()
            && self.config.backoff_multiplier >= 1.0
        {
            self.config.backoff_multiplier
        } else {
            1.0
        };
        let ceiling = self
            .config
            .max_reconnect_delay()
            .max(self.config.reconnect_delay());
        self.current_delay = Duration::try_from_secs_f64(delay.as_secs_f64() * multiplier)
            .unwrap_or(ceiling)
            .min(ceiling);
        delay
    }

    fn reset_backoff(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay = self.config.reconnect_delay();
    }

    fn enter_backoff(&mut self, state: ConnectionState) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.backoff_state = state;
        self.phase = StreamPhase::Backoff;
    }

    /// Wait for the next well-formed snapshot.
    ///
    /// Never fails and never gives up: connect errors, in-band error frames
    /// and dropped links all lead to a backoff and a fresh subscription.
    /// Cancel-safe; dropping the future mid-wait loses nothing but the
    /// in-progress attempt.
    pub async fn next_snapshot(&mut self) -> SystemStatusSnapshot {
        loop {
            match self.phase {
                StreamPhase::Connecting => {
                    self.publish(ConnectionState::Connecting);
                    self.connect_attempts += 1;
                    debug!(
                        endpoint = self.feed.endpoint(),
                        attempt = self.connect_attempts,
                        "Subscribing to status feed"
                    );
                    let limit = self.config.connect_timeout();
                    match timeout(limit, self.feed.connect()).await {
                        Ok(Ok(())) => self.phase = StreamPhase::Streaming,
                        Ok(Err(e)) => {
                            warn!(error = %e, "Status feed subscription failed");
                            self.enter_backoff(ConnectionState::Disconnected);
                        }
                        Err(_) => {
                            warn!(
                                timeout_ms = limit.as_millis() as u64,
                                "Status feed handshake timed out"
                            );
                            self.enter_backoff(ConnectionState::Disconnected);
                        }
                    }
                }
                StreamPhase::Streaming => match self.feed.next_event().await {
                    Some(FeedEvent::Status(snapshot)) => {
                        if self.consecutive_failures > 0 {
                            info!(
                                failures = self.consecutive_failures,
                                "Status feed recovered"
                            );
                            self.reset_backoff();
                        }
                        self.publish(ConnectionState::Online);
                        return snapshot;
                    }
                    Some(FeedEvent::Malformed { reason }) => {
                        warn!(reason = %reason, "Dropping malformed status message");
                    }
                    Some(FeedEvent::Failed { reason }) => {
                        warn!(reason = %reason, "Status feed reported an error, will resubscribe");
                        self.enter_backoff(ConnectionState::Error(reason));
                    }
                    Some(FeedEvent::Disconnected { reason }) => {
                        warn!(reason = %reason, "Status feed lost, will resubscribe");
                        self.enter_backoff(ConnectionState::Disconnected);
                    }
                    None => {
                        warn!("Status feed ended unexpectedly, will resubscribe");
                        self.enter_backoff(ConnectionState::Disconnected);
                    }
                },
                StreamPhase::Backoff => {
                    let state =
                        std::mem::replace(&mut self.backoff_state, ConnectionState::Disconnected);
                    self.publish(state);
                    self.feed.disconnect().await;
                    let delay = self.next_delay();
                    info!(
                        delay_ms = delay.as_millis() as u64,
                        failures = self.consecutive_failures,
                        "Resubscribing after delay"
                    );
                    sleep(delay).await;
                    self.phase = StreamPhase::Connecting;
                }
            }
        }
    }

    /// Release the transport and rewind to `Connecting`.
    pub async fn shutdown(&mut self) {
        self.feed.disconnect().await;
        self.phase = StreamPhase::Connecting;
        debug!(endpoint = self.feed.endpoint(), "Status stream shut down");
    }
}

impl<F: StatusFeed + 'static> StatusStream<F> {
    /// Consume the stream into an unbounded [`Stream`] of snapshots.
    ///
    /// Dropping the returned stream drops the feed and its transport.
    pub fn into_stream(self) -> impl Stream<Item = SystemStatusSnapshot> + Send {
        futures_util::stream::unfold(self, |mut stream| async move {
            let snapshot = stream.next_snapshot().await;
            Some((snapshot, stream))
        })
    }

    /// Run the stream on a background task, handing each snapshot to
    /// `on_snapshot`.
    pub fn spawn<H>(mut self, mut on_snapshot: H) -> StatusTask
    where
        H: FnMut(SystemStatusSnapshot) + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    // Also fires when the sender is dropped.
                    _ = shutdown_rx.changed() => break,
                    snapshot = self.next_snapshot() => on_snapshot(snapshot),
                }
            }
            self.shutdown().await;
        });

        StatusTask {
            shutdown_tx,
            handle,
        }
    }
}

/// Handle to a status stream running in the background.
///
/// Dropping the handle also stops the task, but only [`cancel`](Self::cancel)
/// waits for the transport to be released.
pub struct StatusTask {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl StatusTask {
    /// Stop the stream and wait until its transport has been released.
    pub async fn cancel(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Status task ended abnormally");
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
