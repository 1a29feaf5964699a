//! Handlers for the `status` and `health` commands.

use std::path::Path;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::adapter::inbound::cli::{operator, output};
use crate::domain::{ConnectionState, OperatingMode, SystemStatusSnapshot};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap;

/// Execute `status`: wait for one snapshot and print it.
pub async fn execute(config_path: &Path, timeout_secs: u64) -> Result<()> {
    let config = operator::load_config(config_path)?;
    let mut stream = bootstrap::build_status_stream(&config)?;
    let endpoint = stream.endpoint().to_string();

    let spinner = output::spinner(&format!("Waiting for status from {endpoint}"));
    let result =
        tokio::time::timeout(Duration::from_secs(timeout_secs), stream.next_snapshot()).await;
    let attempts = stream.connect_attempts();
    stream.shutdown().await;

    let snapshot = match result {
        Ok(snapshot) => {
            spinner.finish_and_clear();
            snapshot
        }
        Err(_) => {
            output::spinner_fail(&spinner, "No status received");
            debug!(attempts, "Gave up waiting for status");
            return Err(Error::Connection(format!(
                "no status from {endpoint} within {timeout_secs}s ({attempts} attempts)"
            )));
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "status",
            "endpoint": endpoint,
            "snapshot": snapshot,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Endpoint", &endpoint);
    print_snapshot(&snapshot);
    Ok(())
}

/// Execute `health`: probe the control plane once.
///
/// The probe runs through a [`Console`](crate::application::Console) with no
/// status stream attached, so the reported indicator is the one the probe
/// alone would set.
pub async fn execute_health(config_path: &Path) -> Result<()> {
    let config = operator::load_config(config_path)?;
    let console = bootstrap::build_console(&config);

    let spinner = output::spinner(&format!("Probing {}", config.control.base_url));
    let result = console.refresh_health().await;
    let connection = console.state().view().connection;

    match &result {
        Ok(true) => output::spinner_success(&spinner, "Control plane is healthy"),
        Ok(false) => output::spinner_fail(&spinner, "Control plane reports unhealthy"),
        Err(_) => output::spinner_fail(&spinner, "Control plane unreachable"),
    }
    if output::is_json() {
        output::json_output(json!({
            "command": "health",
            "healthy": result.as_ref().ok(),
            "connection": connection,
        }));
    } else {
        output::field("Connection", connection_label(&connection));
    }

    match result {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::Connection("control plane reports unhealthy".into())),
        Err(e) => Err(e.into()),
    }
}

/// Colored label for the connection indicator.
pub fn connection_label(connection: &ConnectionState) -> String {
    match connection {
        ConnectionState::Online => output::positive(connection),
        ConnectionState::Connecting => output::muted(connection),
        ConnectionState::Disconnected | ConnectionState::Error(_) => output::negative(connection),
    }
}

/// Print a snapshot as labeled fields.
pub fn print_snapshot(snapshot: &SystemStatusSnapshot) {
    output::field("Mode", mode_label(&snapshot.mode));
    output::field(
        "Healthy",
        if snapshot.healthy {
            output::positive("yes")
        } else {
            output::negative("no")
        },
    );
    output::field("Strategies", snapshot.active_strategy_count);
}

/// Colored label for an operating mode.
pub fn mode_label(mode: &OperatingMode) -> String {
    match mode {
        OperatingMode::Active => output::positive(mode),
        OperatingMode::Halted { .. } => output::negative(mode),
        OperatingMode::Unknown(_) => output::muted(mode),
    }
}
