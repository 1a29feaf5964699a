//! Mock [`ControlPlane`] for gateway and console tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{StateChangeRequest, StateChangeResponse};
use crate::error::CommandError;
use crate::port::ControlPlane;

/// A control plane with scripted answers.
///
/// Every `set_state` call records the request, sleeps for the configured
/// delay, then pops the next scripted result (defaults to an accepted
/// response with message `"ok"`). Health probes pop from their own queue
/// (defaults to `Ok(true)`).
#[derive(Clone, Default)]
pub struct ScriptedControlPlane {
    responses: Arc<Mutex<VecDeque<Result<StateChangeResponse, CommandError>>>>,
    health: Arc<Mutex<VecDeque<Result<bool, CommandError>>>>,
    requests: Arc<Mutex<Vec<StateChangeRequest>>>,
    health_calls: Arc<Mutex<u32>>,
    delay: Duration,
}

impl ScriptedControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(self, responses: Vec<Result<StateChangeResponse, CommandError>>) -> Self {
        *self.responses.lock() = responses.into();
        self
    }

    pub fn with_health(self, results: Vec<Result<bool, CommandError>>) -> Self {
        *self.health.lock() = results.into();
        self
    }

    /// Delay every `set_state` answer. Combine with a paused tokio clock.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Requests that reached the transport, in order.
    pub fn requests(&self) -> Vec<StateChangeRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn health_calls(&self) -> u32 {
        *self.health_calls.lock()
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn set_state(
        &self,
        request: &StateChangeRequest,
    ) -> Result<StateChangeResponse, CommandError> {
        self.requests.lock().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(StateChangeResponse::accepted("ok")))
    }

    async fn check_health(&self) -> Result<bool, CommandError> {
        *self.health_calls.lock() += 1;
        self.health.lock().pop_front().unwrap_or(Ok(true))
    }
}
