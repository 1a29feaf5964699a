//! Handler for the `watch` command.

use std::path::Path;

use chrono::Local;
use serde_json::json;
use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::status::{connection_label, mode_label};
use crate::adapter::inbound::cli::{operator, output};
use crate::application::ConsoleView;
use crate::domain::{ConnectionState, SystemStatusSnapshot};
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute `watch`: stream status until Ctrl-C.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = operator::load_config(config_path)?;
    let mut console = bootstrap::build_console(&config);
    let stream = bootstrap::build_status_stream(&config)?;

    if !output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Endpoint", stream.endpoint());
        output::field("Operator", console.operator_id());
        output::hint("press Ctrl-C to stop");
        println!();
    }

    let mut rx = console.state().subscribe();
    console.attach_status(stream).await;

    let mut printer = ViewPrinter::default();
    let initial = rx.borrow_and_update().clone();
    printer.print(&initial);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = rx.borrow_and_update().clone();
                printer.print(&view);
            }
        }
    }

    console.shutdown().await;
    Ok(())
}

/// Prints only what changed between two views.
#[derive(Default)]
struct ViewPrinter {
    connection: Option<ConnectionState>,
    snapshot: Option<SystemStatusSnapshot>,
}

impl ViewPrinter {
    fn print(&mut self, view: &ConsoleView) {
        let now = Local::now().format("%H:%M:%S").to_string();

        if self.connection.as_ref() != Some(&view.connection) {
            self.connection = Some(view.connection.clone());
            print_connection(&now, &view.connection);
        }

        if view.snapshot.is_some() && view.snapshot != self.snapshot {
            self.snapshot = view.snapshot.clone();
            if let Some(snapshot) = &view.snapshot {
                print_snapshot(&now, snapshot);
            }
        }
    }
}

fn print_connection(now: &str, connection: &ConnectionState) {
    if output::is_json() {
        output::emit_json_line("connection", json!({ "timestamp": now, "connection": connection }));
        return;
    }
    output::info(now, "link", &connection_label(connection));
}

fn print_snapshot(now: &str, snapshot: &SystemStatusSnapshot) {
    if output::is_json() {
        output::emit_json_line("snapshot", json!({ "timestamp": now, "snapshot": snapshot }));
        return;
    }
    let healthy = if snapshot.healthy {
        output::positive("healthy")
    } else {
        output::negative("unhealthy")
    };
    output::info(
        now,
        "status",
        &format!(
            "{} {} strategies={}",
            mode_label(&snapshot.mode),
            healthy,
            snapshot.active_strategy_count
        ),
    );
}
