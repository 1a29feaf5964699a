//! Control-plane status feed over WebSocket.
//!
//! One [`ControlPlaneFeed`] is one subscription to `/ws/status`. It does
//! not reconnect; wrap it in a
//! [`StatusStream`](crate::application::stream::StatusStream) for that.
//!
//! # Message Handling
//!
//! - **Text frames**: decoded into [`FeedEvent`]s. Undecodable frames come
//!   back as `Malformed` and the link stays up.
//! - **Ping frames**: answered with a Pong carrying the same payload.
//! - **Close frames and socket errors**: reported as `Disconnected`.
//! - **Other frames** (binary, pong): ignored.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace};

use super::dto::decode_status_frame;
use crate::error::{Error, Result};
use crate::port::{FeedEvent, StatusFeed};

/// WebSocket subscription to the control-plane status feed.
pub struct ControlPlaneFeed {
    /// The WebSocket URL (e.g. `wss://control.example.com/ws/status`).
    url: String,
    ws: Option<WebSocketStream<MaybeTlsStream<TcpStream>>>,
}

impl ControlPlaneFeed {
    /// Create a feed for the given WebSocket URL. Nothing is opened until
    /// [`connect`](StatusFeed::connect).
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ws: None,
        }
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.ws.is_some()
    }
}

#[async_trait]
impl StatusFeed for ControlPlaneFeed {
    async fn connect(&mut self) -> Result<()> {
        // Never hold two transports at once.
        self.disconnect().await;

        info!(url = %self.url, "Connecting to status feed");
        let (ws_stream, response) = connect_async(self.url.as_str()).await?;
        info!(status = %response.status(), "Status feed connected");
        self.ws = Some(ws_stream);
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        let ws = self.ws.as_mut()?;

        loop {
            match ws.next().await? {
                Ok(Message::Text(text)) => {
                    trace!(bytes = text.len(), "Received status frame");
                    return Some(decode_status_frame(&text));
                }
                Ok(Message::Ping(data)) => {
                    trace!("Received WebSocket ping");
                    if ws.send(Message::Pong(data)).await.is_err() {
                        return Some(FeedEvent::Disconnected {
                            reason: "failed to send pong".into(),
                        });
                    }
                }
                Ok(Message::Close(frame)) => {
                    info!(frame = ?frame, "Status feed closed by server");
                    return Some(FeedEvent::Disconnected {
                        reason: frame
                            .map(|f| f.reason.to_string())
                            .filter(|r| !r.is_empty())
                            .unwrap_or_else(|| "closed by server".into()),
                    });
                }
                Ok(_) => continue,
                Err(e) => {
                    error!(error = %e, "Status feed error");
                    return Some(FeedEvent::Disconnected {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    async fn disconnect(&mut self) {
        if let Some(mut ws) = self.ws.take() {
            debug!(url = %self.url, "Releasing status feed transport");
            // Best effort: the socket is dropped either way.
            if let Err(e) = ws.close(None).await {
                trace!(error = %Error::from(e), "Close handshake failed");
            }
        }
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
