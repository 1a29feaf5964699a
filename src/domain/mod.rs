//! Control-plane domain types.
//!
//! Pure data shared by the stream, the gateway and the console state. No I/O.

pub mod command;
pub mod mode;
pub mod status;

pub use command::{StateChangeRequest, StateChangeResponse, TargetState};
pub use mode::OperatingMode;
pub use status::{ConnectionState, SystemStatusSnapshot};
