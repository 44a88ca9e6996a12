// Common types for Sim Session Manager

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the remote simulation link
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SimState {
    Disconnected, // no connection handle
    Connected,    // handle established, simulation not running
    Running,      // simulation running
    Stopped,      // simulation stopped, handle kept for reuse
}

impl SimState {
    /// Check whether a connection handle is expected to be present
    pub fn is_connected(&self) -> bool {
        !matches!(self, SimState::Disconnected)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SimState::Running)
    }
}

/// Script class addressed by a remote script-function call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    /// Main simulation script
    Simulation,
    /// Child script attached to a scene object
    Child,
    /// Customization script
    Customization,
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

/// Single status line shown by the presentation layer
///
/// One slot, last write wins. The presentation layer polls this after
/// every controller call; there is no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Info,
            timestamp: Utc::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
            timestamp: Utc::now(),
        }
    }

    /// The startup value: nothing has been reported yet
    pub fn empty() -> Self {
        Self::info("")
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_state_helpers() {
        assert!(!SimState::Disconnected.is_connected());
        assert!(SimState::Connected.is_connected());
        assert!(SimState::Running.is_connected());
        assert!(SimState::Stopped.is_connected());

        assert!(SimState::Running.is_running());
        assert!(!SimState::Stopped.is_running());
    }

    #[test]
    fn test_status_message() {
        let empty = StatusMessage::empty();
        assert!(empty.is_empty());
        assert!(!empty.is_error());

        let err = StatusMessage::error("boom");
        assert!(err.is_error());
        assert_eq!(err.text, "boom");
    }

    #[test]
    fn test_script_type_serde() {
        let json = serde_json::to_string(&ScriptType::Child).unwrap();
        assert_eq!(json, "\"child\"");
    }
}
