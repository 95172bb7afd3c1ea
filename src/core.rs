//! Core domain types and service traits for LoginWatch
//!
//! This module defines the invocation contract (the incoming `Event` and the
//! outgoing `Response`) and the `Publisher` trait that the dispatcher uses to
//! reach the notification channel.

use crate::error::PublishError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The literal (JSON-encoded) body returned by every successful invocation.
pub const EXECUTION_COMPLETED: &str = "Execution completed";

/// A batch of log records handed to a single invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Event {
    /// The records to inspect. Absent or `null` means no records.
    #[serde(rename = "Records", default, deserialize_with = "null_as_empty")]
    pub records: Vec<Record>,
}

/// A single log record. Only `message` is inspected; other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    /// Free-text log line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Record {
    /// Creates a record carrying the given message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// The record's message, or the empty string if it has none.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

impl Event {
    /// Builds an event from a list of messages, one record per message.
    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: messages.into_iter().map(Record::with_message).collect(),
        }
    }

    /// Decodes an event from a JSON value without consuming it.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Record>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The envelope handed back to the invocation environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// The fixed success envelope: status 200 and a JSON-encoded
    /// `"Execution completed"` body.
    pub fn completed() -> Self {
        Self {
            status_code: 200,
            body: format!("\"{}\"", EXECUTION_COMPLETED),
        }
    }
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends text to a named publish/subscribe channel.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// A short, descriptive name for the publisher (e.g., "sns", "dry-run").
    /// Used for logging.
    fn name(&self) -> &str;

    /// Publishes a message to the given topic.
    ///
    /// # Arguments
    /// * `topic_arn` - Identifier of the destination channel
    /// * `message` - The text to deliver
    ///
    /// # Returns
    /// * `Ok(message_id)` once the channel has accepted the message
    /// * `Err` if the channel rejected it or could not be reached
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError>;
}
