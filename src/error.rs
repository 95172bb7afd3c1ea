//! Error types for dispatching and publishing alerts.

use thiserror::Error;

/// Failures reported by a `Publisher`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    /// The SDK call failed (network, credentials, throttling, ...).
    #[error("SNS publish failed: {0}")]
    Sdk(String),

    /// The channel accepted the request but refused the message.
    #[error("message rejected by notification channel: {0}")]
    Rejected(String),
}

/// Failures that abort a single invocation.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The event could not be decoded into records.
    #[error("malformed event: {0}")]
    InputShape(#[from] serde_json::Error),

    /// Publishing the alert for a record failed. Records after it were not processed.
    #[error("failed to publish alert for record {record_index}: {source}")]
    Publish {
        record_index: usize,
        #[source]
        source: PublishError,
    },

    /// The dispatcher was built from invalid settings.
    #[error("invalid alert configuration: {0}")]
    Config(String),
}

impl DispatchError {
    /// A short, stable name for the error kind, reported back to the caller.
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::InputShape(_) => "InputShapeError",
            DispatchError::Publish { .. } => "PublishError",
            DispatchError::Config(_) => "ConfigError",
        }
    }
}
