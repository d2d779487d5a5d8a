use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

const TELEMETRY_TARGET: &str = "ledgerflow::events::telemetry";

/// Contract names for boundary commands.
pub const CMD_REBUILD_GRAPH: &str = "RebuildGraph";
pub const CMD_RESIZE_VIEWPORT: &str = "ResizeViewport";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandLifecycle {
    Start,
    Success,
    Failure,
}

impl fmt::Display for CommandLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "command_start"),
            Self::Success => write!(f, "command_success"),
            Self::Failure => write!(f, "command_failure"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandTelemetry {
    pub correlation_id: String,
    pub command: String,
    pub lifecycle: CommandLifecycle,
    pub error_reason: Option<String>,
}

impl CommandTelemetry {
    pub fn start(command: impl Into<String>, correlation_id: &str) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            command: command.into(),
            lifecycle: CommandLifecycle::Start,
            error_reason: None,
        }
    }

    pub fn success(command: impl Into<String>, correlation_id: &str) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            command: command.into(),
            lifecycle: CommandLifecycle::Success,
            error_reason: None,
        }
    }

    pub fn failure(
        command: impl Into<String>,
        correlation_id: &str,
        reason: Option<String>,
    ) -> Self {
        Self {
            correlation_id: correlation_id.to_string(),
            command: command.into(),
            lifecycle: CommandLifecycle::Failure,
            error_reason: reason,
        }
    }

    /// Emits the record as a structured log line. Serialization problems are
    /// downgraded to a warning rather than dropped silently.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(payload) => info!(
                target: TELEMETRY_TARGET,
                lifecycle = %self.lifecycle,
                command = %self.command,
                correlation_id = %self.correlation_id,
                "{payload}"
            ),
            Err(error) => warn!(
                target: TELEMETRY_TARGET,
                "failed to serialize telemetry record: {error}"
            ),
        }
    }
}
