//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!             ┌──────────────────────────┐
//!             │       Application        │
//!             │ StatusStream · Gateway   │
//!             └────────────┬─────────────┘
//!                 ┌────────┴────────┐
//!                 ▼                 ▼
//!          ┌────────────┐    ┌──────────────┐
//!          │ StatusFeed │    │ ControlPlane │
//!          │ (WebSocket)│    │   (HTTPS)    │
//!          └────────────┘    └──────────────┘
//! ```

pub mod outbound;

pub use outbound::control::ControlPlane;
pub use outbound::feed::{FeedEvent, StatusFeed};
