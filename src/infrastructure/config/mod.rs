//! Infrastructure configuration modules.

pub mod control;
pub mod logging;
pub mod settings;
pub mod stream;

pub use control::{CommandEndpoint, ControlConfig, OperatorConfig};
pub use logging::LoggingConfig;
pub use settings::Config;
pub use stream::StreamConfig;
