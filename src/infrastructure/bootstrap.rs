//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::control_plane::{ControlPlaneClient, ControlPlaneFeed};
use crate::application::{CommandGateway, Console, StatusStream};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::CommandEndpoint;
use crate::port::ControlPlane;

/// Build the HTTP control-plane adapter.
pub fn build_control_plane(config: &Config) -> Arc<dyn ControlPlane> {
    if config.control.endpoint == CommandEndpoint::LegacyKill {
        warn!("Legacy kill endpoint selected; resume is unavailable");
    }
    Arc::new(ControlPlaneClient::from_config(&config.control))
}

/// Build the command gateway, bounded by `control.request_timeout_ms`.
pub fn build_gateway(config: &Config) -> CommandGateway {
    CommandGateway::with_timeout(build_control_plane(config), config.control.request_timeout())
}

/// Build the reconnecting status stream for the configured service.
///
/// # Errors
///
/// Returns an error if the status feed URL cannot be derived from
/// `control.base_url`.
pub fn build_status_stream(config: &Config) -> Result<StatusStream<ControlPlaneFeed>> {
    let url = config.status_url()?;
    info!(url = %url, "Status feed configured");
    Ok(StatusStream::new(
        ControlPlaneFeed::new(url.as_str()),
        config.stream.clone(),
    ))
}

/// Build a console with its gateway. The status stream is attached
/// separately so callers choose when to start it.
pub fn build_console(config: &Config) -> Console {
    info!(
        base_url = %config.control.base_url,
        operator = %config.operator.id,
        endpoint = %config.control.endpoint,
        "Console initialized"
    );
    Console::new(build_gateway(config), config.operator.id.clone())
}
