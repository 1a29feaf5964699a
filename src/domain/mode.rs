//! Operating mode reported by the control plane.
//!
//! The control plane reports its mode as a free-form string. Two tokens are
//! well known (`active` and `halted`), but the service may append a sub-state
//! to the halted token (e.g. `halted-liquidating`). Any mode whose string
//! begins with the halted token counts as halted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire token for the running state.
pub const ACTIVE_TOKEN: &str = "active";

/// Wire token prefix for every halted state.
pub const HALTED_TOKEN: &str = "halted";

/// Operating mode of the remote trading system.
///
/// The raw string is preserved so sub-states and unknown modes survive a
/// round trip to the display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperatingMode {
    /// Trading is running.
    Active,
    /// Trading is halted. `raw` is the mode exactly as received.
    Halted { raw: String },
    /// A mode this console does not recognise.
    Unknown(String),
}

impl OperatingMode {
    /// Parse a mode string from the control plane.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with(HALTED_TOKEN) {
            return Self::Halted {
                raw: raw.to_string(),
            };
        }
        if raw == ACTIVE_TOKEN {
            return Self::Active;
        }
        Self::Unknown(raw.to_string())
    }

    /// Plain `halted`.
    #[must_use]
    pub fn halted() -> Self {
        Self::Halted {
            raw: HALTED_TOKEN.to_string(),
        }
    }

    /// True for `halted` and every `halted*` sub-state.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        matches!(self, Self::Halted { .. })
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Sub-state after the halted token, without its leading separator.
    /// `None` for plain `halted` and for modes that are not halted.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Halted { raw } => {
                let detail = raw
                    .get(HALTED_TOKEN.len()..)
                    .unwrap_or_default()
                    .trim_start_matches(['-', '_', ':', ' ']);
                (!detail.is_empty()).then_some(detail)
            }
            Self::Active | Self::Unknown(_) => None,
        }
    }

    /// The mode as the control plane spelled it.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Active => ACTIVE_TOKEN,
            Self::Halted { raw } | Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OperatingMode {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OperatingMode> for String {
    fn from(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Active => ACTIVE_TOKEN.to_string(),
            OperatingMode::Halted { raw } | OperatingMode::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_halted_is_halted() {
        assert!(OperatingMode::parse("halted").is_halted());
    }

    #[test]
    fn halted_sub_state_is_halted() {
        let mode = OperatingMode::parse("halted-liquidating");
        assert!(mode.is_halted());
        assert_eq!(mode.detail(), Some("liquidating"));
    }

    #[test]
    fn plain_halted_has_no_detail() {
        assert_eq!(OperatingMode::parse("halted"), OperatingMode::halted());
        assert_eq!(OperatingMode::halted().detail(), None);
        assert_eq!(OperatingMode::parse("halted-").detail(), None);
        assert_eq!(OperatingMode::parse("active").detail(), None);
    }

    #[test]
    fn active_is_not_halted() {
        let mode = OperatingMode::parse("active");
        assert!(!mode.is_halted());
        assert!(mode.is_active());
    }

    #[test]
    fn unknown_mode_is_preserved() {
        let mode = OperatingMode::parse("maintenance");
        assert!(!mode.is_halted());
        assert_eq!(mode.to_string(), "maintenance");
    }

    #[test]
    fn halted_is_case_sensitive_prefix() {
        // The control plane only emits lowercase tokens.
        assert!(!OperatingMode::parse("HALTED").is_halted());
        assert!(!OperatingMode::parse("not-halted").is_halted());
    }

    #[test]
    fn wire_form_keeps_sub_state() {
        assert_eq!(
            OperatingMode::parse("halted-liquidating").as_wire(),
            "halted-liquidating"
        );
        assert_eq!(OperatingMode::parse("halted").as_wire(), "halted");
    }

    #[test]
    fn sub_state_separator_is_kept_verbatim() {
        for raw in ["halted_liquidating", "halted:risk", "haltedX", "halted-", "halted risk"] {
            let mode = OperatingMode::parse(raw);
            assert!(mode.is_halted(), "{raw} should be halted");
            assert_eq!(mode.as_wire(), raw);
            assert_eq!(mode.to_string(), raw);
            assert_eq!(String::from(mode), raw);
        }
        assert_eq!(OperatingMode::parse("halted_liquidating").detail(), Some("liquidating"));
        assert_eq!(OperatingMode::parse("halted:risk").detail(), Some("risk"));
        assert_eq!(OperatingMode::parse("haltedX").detail(), Some("X"));
    }

    #[test]
    fn deserializes_from_json_string() {
        let mode: OperatingMode = serde_json::from_str("\"halted:risk\"").unwrap();
        assert!(mode.is_halted());
        assert_eq!(serde_json::to_string(&mode).unwrap(), "\"halted:risk\"");
    }
}
