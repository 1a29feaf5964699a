//! Scripted WebSocket status server built on `accept_async`.
//!
//! Connection `n` plays `scripts[n]` (the last script repeats). After its
//! frames the server keeps the socket open until the client goes away,
//! unless the script closed it.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Debug, Clone)]
pub enum Frame {
    Text(String),
    Ping,
    Close,
}

pub fn text(body: &str) -> Frame {
    Frame::Text(body.to_string())
}

pub struct StatusServer {
    pub url: String,
    connections: Arc<AtomicU32>,
    closed_by_client: Arc<AtomicU32>,
    handle: JoinHandle<()>,
}

impl StatusServer {
    /// Completed WebSocket handshakes so far.
    pub fn connections(&self) -> u32 {
        self.connections.load(Ordering::SeqCst)
    }

    /// Connections that ended from the client side.
    pub fn closed_by_client(&self) -> u32 {
        self.closed_by_client.load(Ordering::SeqCst)
    }
}

impl Drop for StatusServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn(scripts: Vec<Vec<Frame>>) -> StatusServer {
    assert!(!scripts.is_empty(), "at least one script");
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicU32::new(0));
    let closed_by_client = Arc::new(AtomicU32::new(0));

    let handle = {
        let connections = Arc::clone(&connections);
        let closed_by_client = Arc::clone(&closed_by_client);
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                let Ok(mut ws) = accept_async(socket).await else {
                    continue;
                };
                let index = connections.fetch_add(1, Ordering::SeqCst) as usize;
                let script = scripts[index.min(scripts.len() - 1)].clone();
                let closed_by_client = Arc::clone(&closed_by_client);

                tokio::spawn(async move {
                    for frame in script {
                        let message = match frame {
                            Frame::Text(body) => Message::Text(body),
                            Frame::Ping => Message::Ping(b"keepalive".to_vec()),
                            Frame::Close => {
                                let _ = ws.close(None).await;
                                return;
                            }
                        };
                        if ws.send(message).await.is_err() {
                            return;
                        }
                    }
                    while let Some(message) = ws.next().await {
                        match message {
                            Ok(Message::Close(_)) | Err(_) => break,
                            Ok(_) => {}
                        }
                    }
                    closed_by_client.fetch_add(1, Ordering::SeqCst);
                });
            }
        })
    };

    StatusServer {
        url: format!("ws://{addr}/ws/status"),
        connections,
        closed_by_client,
        handle,
    }
}

/// Listener that accepts TCP connections and never answers the WebSocket
/// handshake.
pub struct SilentServer {
    pub url: String,
    accepted: Arc<AtomicU32>,
    handle: JoinHandle<()>,
}

impl SilentServer {
    /// TCP connections accepted so far.
    pub fn accepted(&self) -> u32 {
        self.accepted.load(Ordering::SeqCst)
    }
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_silent() -> SilentServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicU32::new(0));

    let handle = {
        let accepted = Arc::clone(&accepted);
        tokio::spawn(async move {
            // Keep every socket open so the client sees a stall, not a reset.
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                accepted.fetch_add(1, Ordering::SeqCst);
                held.push(socket);
            }
        })
    };

    SilentServer {
        url: format!("ws://{addr}/ws/status"),
        accepted,
        handle,
    }
}
