//! haltctl - operator console core for an autonomous trading system.
//!
//! Two capabilities, both aimed at a remote control-plane service:
//!
//! - **Status stream** - an endless, self-healing WebSocket subscription to
//!   system status pushes. Connection trouble never surfaces as an error;
//!   it shows on the connection indicator while the stream backs off and
//!   resubscribes.
//! - **Command gateway** - privileged halt/resume commands over HTTPS with
//!   at most one command in flight, a fixed timeout and no retries.
//!
//! # Architecture
//!
//! - [`domain`] - Snapshots, operating modes, commands
//! - [`port`] - `StatusFeed` and `ControlPlane` traits
//! - [`adapter`] - WebSocket/HTTP implementations and the CLI
//! - [`application`] - `StatusStream`, `CommandGateway`, `Console` and the
//!   observable `ConsoleState`
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use haltctl::infrastructure::bootstrap;
//! use haltctl::infrastructure::config::Config;
//!
//! # async fn run() -> haltctl::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let mut console = bootstrap::build_console(&config);
//! console.attach_status(bootstrap::build_status_stream(&config)?).await;
//!
//! console.halt(false, "manual stop").await?;
//! println!("halted: {}", console.state().view().halted);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
