//! Console service.
//!
//! [`Console`] owns the observable [`ConsoleState`], the background status
//! task and the [`CommandGateway`]. It applies the display rules: stream
//! pushes are authoritative, an accepted command flips the halted indicator
//! ahead of the stream, and a rejected or failed command leaves it alone.

use std::sync::Arc;

use tracing::{info, warn};

use super::gateway::{CommandGateway, CommandOutcome};
use super::state::ConsoleState;
use super::stream::{StatusStream, StatusTask};
use crate::domain::{ConnectionState, TargetState};
use crate::error::CommandError;
use crate::port::StatusFeed;

/// Keeps `command_pending` set for the lifetime of one submission.
struct PendingGuard<'a> {
    state: &'a ConsoleState,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a ConsoleState) -> Self {
        state.set_command_pending(true);
        Self { state, armed: true }
    }

    /// Leave the flag to whoever set it first.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.state.set_command_pending(false);
        }
    }
}

pub struct Console {
    state: Arc<ConsoleState>,
    gateway: CommandGateway,
    operator_id: String,
    status_task: Option<StatusTask>,
}

impl Console {
    #[must_use]
    pub fn new(gateway: CommandGateway, operator_id: impl Into<String>) -> Self {
        Self {
            state: Arc::new(ConsoleState::new()),
            gateway,
            operator_id: operator_id.into(),
            status_task: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &Arc<ConsoleState> {
        &self.state
    }

    #[must_use]
    pub fn gateway(&self) -> &CommandGateway {
        &self.gateway
    }

    #[must_use]
    pub fn operator_id(&self) -> &str {
        &self.operator_id
    }

    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.status_task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start feeding `stream` into the console state on a background task.
    ///
    /// A previously attached stream is cancelled first.
    pub async fn attach_status<F>(&mut self, mut stream: StatusStream<F>)
    where
        F: StatusFeed + 'static,
    {
        self.detach_status().await;

        stream.set_observer(self.state.clone());
        info!(endpoint = stream.endpoint(), "Attaching status stream");

        let state = Arc::clone(&self.state);
        self.status_task = Some(stream.spawn(move |snapshot| state.apply_snapshot(snapshot)));
    }

    /// Cancel the status task and wait for its transport to close.
    pub async fn detach_status(&mut self) {
        if let Some(task) = self.status_task.take() {
            task.cancel().await;
        }
    }

    pub async fn shutdown(&mut self) {
        self.detach_status().await;
        info!("Console shut down");
    }

    /// Submit a state change and fold the outcome into the console state.
    ///
    /// # Errors
    ///
    /// Returns the gateway's [`CommandError`] after surfacing it on the
    /// console state.
    pub async fn set_state(
        &self,
        target: TargetState,
        liquidate: bool,
        reason: &str,
    ) -> Result<CommandOutcome, CommandError> {
        if self.gateway.is_in_flight() {
            return Ok(CommandOutcome::AlreadyInFlight);
        }

        let mut pending = PendingGuard::new(&self.state);
        let result = self
            .gateway
            .set_state(target, liquidate, &self.operator_id, reason)
            .await;

        match &result {
            Ok(CommandOutcome::Completed(response)) if response.success => {
                self.state.apply_optimistic(target);
                self.state.report_success(response.message.clone());
            }
            Ok(CommandOutcome::Completed(response)) => {
                self.state.report_error(response.message.clone());
            }
            Ok(CommandOutcome::AlreadyInFlight) => pending.disarm(),
            Err(e) => {
                warn!(target = %target, error = %e, "Command did not reach a verdict");
                self.state.report_error(e.operator_message());
            }
        }

        result
    }

    /// Halt trading.
    ///
    /// # Errors
    ///
    /// See [`Console::set_state`].
    pub async fn halt(
        &self,
        liquidate: bool,
        reason: &str,
    ) -> Result<CommandOutcome, CommandError> {
        self.set_state(TargetState::Halted, liquidate, reason).await
    }

    /// Resume trading.
    ///
    /// # Errors
    ///
    /// See [`Console::set_state`].
    pub async fn resume(&self, reason: &str) -> Result<CommandOutcome, CommandError> {
        self.set_state(TargetState::Active, false, reason).await
    }

    /// Probe the control plane's health endpoint.
    ///
    /// The result only moves the connection indicator while the stream is
    /// not online. The halted indicator is never touched.
    ///
    /// # Errors
    ///
    /// Returns the probe's [`CommandError`] if the service is unreachable.
    pub async fn refresh_health(&self) -> Result<bool, CommandError> {
        let result = self.gateway.check_health().await;
        let stream_online = self.state.view().connection.is_online();

        match &result {
            Ok(true) => {
                if !stream_online {
                    self.state.set_connection(ConnectionState::Online);
                }
            }
            Ok(false) => {
                if !stream_online {
                    self.state
                        .set_connection(ConnectionState::Error("service reports unhealthy".into()));
                }
            }
            Err(e) => {
                warn!(error = %e, "Health probe failed");
                if !stream_online {
                    self.state.set_connection(ConnectionState::Disconnected);
                }
            }
        }

        result
    }
}
