//! Application services (use cases).
//!
//! These services drive the outbound ports and keep the observable console
//! state current.

pub mod console;
pub mod gateway;
pub mod state;
pub mod stream;

pub use console::Console;
pub use gateway::{CommandGateway, CommandOutcome, DEFAULT_COMMAND_TIMEOUT};
pub use state::{ConnectionObserver, ConsoleState, ConsoleView};
pub use stream::{StatusStream, StatusTask, StreamPhase};
