//! Control-plane REST client.
//!
//! Supports two command surfaces:
//! - **Unified** (`POST /api/v1/system/state`) - halt and resume
//! - **Legacy kill** (`POST /api/v1/system/kill`) - halt only, deprecated
//!
//! Every call makes exactly one attempt. Privileged commands must never be
//! replayed by the transport layer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::dto::LegacyKillBody;
use crate::domain::{StateChangeRequest, StateChangeResponse, TargetState};
use crate::error::CommandError;
use crate::infrastructure::config::{CommandEndpoint, ControlConfig};
use crate::port::ControlPlane;

const STATE_PATH: &str = "/api/v1/system/state";
const KILL_PATH: &str = "/api/v1/system/kill";
const HEALTH_PATH: &str = "/health";

/// Header carrying the per-command correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for the control-plane service.
pub struct ControlPlaneClient {
    http: HttpClient,
    base_url: String,
    endpoint: CommandEndpoint,
}

impl ControlPlaneClient {
    /// Create a client with default HTTP settings and the unified endpoint.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: normalize_base(base_url.into()),
            endpoint: CommandEndpoint::Unified,
        }
    }

    #[must_use]
    pub fn from_config(config: &ControlConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: normalize_base(config.base_url.clone()),
            endpoint: config.endpoint,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        self
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: CommandEndpoint) -> Self {
        self.endpoint = endpoint;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_command<B>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<StateChangeResponse, CommandError>
    where
        B: serde::Serialize + Sync,
    {
        let url = self.url(path);
        let request_id = Uuid::new_v4();
        debug!(url = %url, request_id = %request_id, "Posting command");

        let response = self
            .http
            .post(&url)
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| network_error(&e))?;
        let decoded = serde_json::from_slice::<StateChangeResponse>(&bytes);

        match (status.is_success(), decoded) {
            (true, Ok(parsed)) => {
                info!(
                    request_id = %request_id,
                    success = parsed.success,
                    "Command answered"
                );
                Ok(parsed)
            }
            (true, Err(e)) => Err(CommandError::network(format!(
                "unreadable response body: {e}"
            ))),
            // A refusal may arrive with an error status; honour its message.
            (false, Ok(parsed)) if !parsed.success => {
                info!(request_id = %request_id, status = %status, "Command rejected");
                Ok(parsed)
            }
            (false, _) => Err(CommandError::network(format!("HTTP status {status}"))),
        }
    }
}

fn normalize_base(base_url: String) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn network_error(err: &reqwest::Error) -> CommandError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_decode() {
        "unreadable response"
    } else {
        "request failed"
    };
    CommandError::network(format!("{kind}: {err}"))
}

#[async_trait]
impl ControlPlane for ControlPlaneClient {
    async fn set_state(
        &self,
        request: &StateChangeRequest,
    ) -> Result<StateChangeResponse, CommandError> {
        match self.endpoint {
            CommandEndpoint::Unified => self.post_command(STATE_PATH, request).await,
            CommandEndpoint::LegacyKill => {
                if request.state() == TargetState::Active {
                    return Err(CommandError::Unsupported(
                        "the legacy kill endpoint cannot resume trading; \
                         switch control.endpoint to \"unified\""
                            .into(),
                    ));
                }
                warn!("Using deprecated /api/v1/system/kill endpoint");
                self.post_command(KILL_PATH, &LegacyKillBody::from(request))
                    .await
            }
        }
    }

    async fn check_health(&self) -> Result<bool, CommandError> {
        let url = self.url(HEALTH_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| network_error(&e))?;
        let healthy = response.status() == StatusCode::OK;
        debug!(status = %response.status(), healthy, "Health probe answered");
        Ok(healthy)
    }
}
