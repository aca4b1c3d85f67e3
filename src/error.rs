//! Error types for configuration and diagnostics

use thiserror::Error;

use crate::diagnostics::EventId;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A warnings builder call was given no event ids
    #[error("'{method}' requires at least one event id")]
    EmptyEventIds { method: &'static str },

    /// Event id name or number not known to any provider
    #[error("Unknown event id '{0}'. Run 'querytree events' to list known ids.")]
    UnknownEventId(String),

    /// An options extension rejected the assembled options
    #[error("Invalid '{extension}' options: {reason}")]
    InvalidExtension {
        extension: &'static str,
        reason: String,
    },

    /// A diagnostic configured to throw was raised while configuring
    #[error(transparent)]
    Warning(#[from] WarningError),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Raised when a diagnostic event is configured as [`WarningBehavior::Throw`](crate::diagnostics::WarningBehavior::Throw).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WarningError {
    #[error(
        "An error was generated for warning '{event_id}': {message} This exception can be suppressed or logged by passing event ID '{event_id}' to 'ignore' or 'log_on' when configuring warnings."
    )]
    WarningAsError { event_id: EventId, message: String },
}

impl WarningError {
    pub fn event_id(&self) -> EventId {
        match self {
            WarningError::WarningAsError { event_id, .. } => *event_id,
        }
    }
}

/// Configuration result type
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
