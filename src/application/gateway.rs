//! Privileged command gateway.
//!
//! [`CommandGateway`] sends halt/resume commands to the control plane with
//! at most one command in flight. A second submission while the first is
//! pending is ignored. Commands are never retried: after a failure the
//! operator decides whether to try again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::{StateChangeRequest, StateChangeResponse, TargetState};
use crate::error::CommandError;
use crate::port::ControlPlane;

/// Default bound on a single command call.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a submission that did not fail in transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The control plane answered. Check `success` for its verdict.
    Completed(StateChangeResponse),
    /// Another command was still pending; nothing was sent.
    AlreadyInFlight,
}

impl CommandOutcome {
    /// True only for an accepted command.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Completed(StateChangeResponse { success: true, .. }))
    }
}

/// Clears the in-flight flag when the submission ends, including when the
/// submitting future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Sends privileged state changes with a re-entrancy guard and a timeout.
pub struct CommandGateway {
    control: Arc<dyn ControlPlane>,
    timeout: Duration,
    in_flight: AtomicBool,
}

impl CommandGateway {
    #[must_use]
    pub fn new(control: Arc<dyn ControlPlane>) -> Self {
        Self::with_timeout(control, DEFAULT_COMMAND_TIMEOUT)
    }

    #[must_use]
    pub fn with_timeout(control: Arc<dyn ControlPlane>, timeout: Duration) -> Self {
        Self {
            control,
            timeout,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    /// Ask the control plane to move to `target`.
    ///
    /// `liquidate` only applies to halts; a resume always goes out with
    /// `liquidate = false`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Network`] if the call fails in transport or
    /// does not finish within the timeout. In both cases the remote outcome
    /// is unknown.
    pub async fn set_state(
        &self,
        target: TargetState,
        liquidate: bool,
        operator_id: &str,
        reason: &str,
    ) -> Result<CommandOutcome, CommandError> {
        let Some(_guard) = self.try_begin() else {
            debug!(target = %target, "Command already in flight, ignoring");
            return Ok(CommandOutcome::AlreadyInFlight);
        };

        let request = StateChangeRequest::new(target, liquidate, operator_id, reason);
        info!(
            target = %request.state(),
            liquidate = request.liquidate(),
            operator = request.operator(),
            "Sending state change"
        );

        let response = match timeout(self.timeout, self.control.set_state(&request)).await {
            Ok(result) => result,
            Err(_) => Err(CommandError::network(format!(
                "no response within {} ms",
                self.timeout.as_millis()
            ))),
        };

        match response {
            Ok(response) => {
                if response.success {
                    info!(target = %target, message = %response.message, "State change accepted");
                } else {
                    warn!(target = %target, message = %response.message, "State change rejected");
                }
                Ok(CommandOutcome::Completed(response))
            }
            Err(e) => {
                warn!(target = %target, error = %e, "State change failed");
                Err(e)
            }
        }
    }

    /// Best-effort reachability probe, bounded by the same timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Network`] if the service cannot be reached.
    pub async fn check_health(&self) -> Result<bool, CommandError> {
        match timeout(self.timeout, self.control.check_health()).await {
            Ok(result) => result,
            Err(_) => Err(CommandError::network("health probe timed out")),
        }
    }
}
