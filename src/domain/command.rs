//! Privileged state-change commands.
//!
//! A [`StateChangeRequest`] is built fresh for every operator action and
//! dropped once its response (or failure) has been handled.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The state an operator asks the trading system to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetState {
    Active,
    Halted,
}

impl TargetState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Halted => "halted",
        }
    }

    /// Operator-facing verb for this transition.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Active => "resume",
            Self::Halted => "halt",
        }
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to change the trading system's operating state.
///
/// Fields are private so the liquidation invariant cannot be bypassed:
/// only a halt may carry `liquidate = true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateChangeRequest {
    operator: String,
    reason: String,
    state: TargetState,
    liquidate: bool,
}

impl StateChangeRequest {
    /// Build a request. `liquidate` is ignored unless `state` is
    /// [`TargetState::Halted`].
    #[must_use]
    pub fn new(
        state: TargetState,
        liquidate: bool,
        operator: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            operator: operator.into(),
            reason: reason.into(),
            state,
            liquidate: liquidate && state == TargetState::Halted,
        }
    }

    #[must_use]
    pub fn halt(liquidate: bool, operator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(TargetState::Halted, liquidate, operator, reason)
    }

    #[must_use]
    pub fn resume(operator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(TargetState::Active, false, operator, reason)
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    #[must_use]
    pub const fn state(&self) -> TargetState {
        self.state
    }

    #[must_use]
    pub const fn liquidate(&self) -> bool {
        self.liquidate
    }
}

/// The control plane's answer to a state-change request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl StateChangeResponse {
    #[must_use]
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
