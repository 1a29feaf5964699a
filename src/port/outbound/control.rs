//! Control-plane command port.

use async_trait::async_trait;

use crate::domain::{StateChangeRequest, StateChangeResponse};
use crate::error::CommandError;

/// Request/response channel to the control plane.
///
/// Implementations perform exactly one attempt per call. Privileged
/// commands are never retried below this trait.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Submit a state change.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Network`] when the call fails in transport or
    /// the response body cannot be read. An explicit rejection is returned
    /// as `Ok` with `success: false`.
    async fn set_state(
        &self,
        request: &StateChangeRequest,
    ) -> Result<StateChangeResponse, CommandError>;

    /// Probe the service's health endpoint. `Ok(true)` means reachable and
    /// healthy.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Network`] when the service cannot be reached.
    async fn check_health(&self) -> Result<bool, CommandError>;
}
