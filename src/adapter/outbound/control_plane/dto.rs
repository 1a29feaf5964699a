//! Wire formats for the control-plane service.

use serde::Serialize;

use crate::domain::{StateChangeRequest, SystemStatusSnapshot};
use crate::port::FeedEvent;

/// Prefix of an in-band error frame on the status feed. Matched
/// case-insensitively after leading whitespace.
pub const ERROR_MARKER: &str = "ERROR";

/// Body of the deprecated `POST /api/v1/system/kill` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyKillBody<'a> {
    pub operator_id: &'a str,
    pub reason: &'a str,
    pub liquidate: bool,
}

impl<'a> From<&'a StateChangeRequest> for LegacyKillBody<'a> {
    fn from(request: &'a StateChangeRequest) -> Self {
        Self {
            operator_id: request.operator(),
            reason: request.reason(),
            liquidate: request.liquidate(),
        }
    }
}

/// Decode one text frame from the status feed.
///
/// Never fails: undecodable input becomes [`FeedEvent::Malformed`].
#[must_use]
pub fn decode_status_frame(text: &str) -> FeedEvent {
    let trimmed = text.trim_start();
    if let Some(reason) = strip_error_marker(trimmed) {
        return FeedEvent::Failed { reason };
    }

    match serde_json::from_str::<SystemStatusSnapshot>(trimmed) {
        Ok(snapshot) => FeedEvent::Status(snapshot),
        Err(e) => FeedEvent::Malformed {
            reason: e.to_string(),
        },
    }
}

fn strip_error_marker(text: &str) -> Option<String> {
    let head = text.get(..ERROR_MARKER.len())?;
    if !head.eq_ignore_ascii_case(ERROR_MARKER) {
        return None;
    }
    let rest = text[ERROR_MARKER.len()..].trim_start_matches([':', ' ']).trim();
    Some(if rest.is_empty() {
        "server reported an error".to_string()
    } else {
        rest.to_string()
    })
}
