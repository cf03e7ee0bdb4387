use std::time::Duration;

use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

/// Error type shared by the aggregation and reminder components.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Notifier unavailable: {0}")]
    NotifierUnavailable(#[source] NotifierError),
    #[error("Failed to schedule `{reminder_id}`: {source}")]
    ScheduleFailed {
        reminder_id: String,
        #[source]
        source: NotifierError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures reported by a trigger notifier implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifierError {
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
