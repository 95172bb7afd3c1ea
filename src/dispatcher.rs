//! The alert dispatcher: scans an event's records and publishes an alert for
//! every failed login.
//!
//! Records are handled strictly in order and each publish completes before the
//! next record is looked at. A publish failure aborts the invocation; records
//! after the failing one are not processed.

use crate::config::{AlertConfig, Config};
use crate::core::{Event, Publisher, Response};
use crate::error::DispatchError;
use crate::formatting::{event_dump, AlertFormatter, LoginAlertFormatter};
use crate::matching::LoginFailureMatcher;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Holds the read-only handles needed to process events. Cheap to share
/// behind an `Arc` across concurrent invocations.
pub struct AlertDispatcher {
    publisher: Arc<dyn Publisher>,
    topic_arn: String,
    matcher: LoginFailureMatcher,
    formatter: Box<dyn AlertFormatter>,
}

impl AlertDispatcher {
    /// Creates a dispatcher with the default matcher and formatter.
    pub fn new(publisher: Arc<dyn Publisher>, topic_arn: impl Into<String>) -> Self {
        Self {
            publisher,
            topic_arn: topic_arn.into(),
            matcher: LoginFailureMatcher::default(),
            formatter: Box::new(LoginAlertFormatter::default()),
        }
    }

    /// Creates a dispatcher from the application configuration.
    pub fn from_config(publisher: Arc<dyn Publisher>, config: &Config) -> Result<Self, DispatchError> {
        let AlertConfig {
            match_pattern,
            prefix,
        } = &config.alert;

        Ok(Self {
            publisher,
            topic_arn: config.sns.topic_arn.clone(),
            matcher: LoginFailureMatcher::new(match_pattern.clone())?,
            formatter: Box::new(LoginAlertFormatter::new(prefix.clone())),
        })
    }

    /// The topic alerts are published to.
    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }

    /// Handles one raw invocation event.
    ///
    /// # Returns
    /// * `Ok(Response::completed())` once every record has been processed
    /// * `Err(DispatchError::InputShape)` if the event is not shaped like
    ///   `{"Records": [{"message": "..."}]}`; nothing is published
    /// * `Err(DispatchError::Publish)` if any publish fails
    pub async fn dispatch(&self, event: &Value) -> Result<Response, DispatchError> {
        info!("Event Received: {}", event_dump(event));
        let event = Event::from_json(event)?;
        self.dispatch_event(&event).await
    }

    /// Handles an already decoded event.
    #[instrument(skip_all, fields(records = event.records.len(), publisher = self.publisher.name()))]
    pub async fn dispatch_event(&self, event: &Event) -> Result<Response, DispatchError> {
        for (record_index, record) in event.records.iter().enumerate() {
            metrics::counter!("records_processed").increment(1);

            let message = record.message();
            if !self.matcher.is_match(message) {
                continue;
            }

            let alert = self.formatter.format(message);
            let message_id = self
                .publisher
                .publish(&self.topic_arn, &alert)
                .await
                .map_err(|source| DispatchError::Publish {
                    record_index,
                    source,
                })?;

            debug!(record_index, message_id = %message_id, "Publish acknowledged");
            metrics::counter!("alerts_published").increment(1);
            info!("Alert sent to SNS");
        }

        Ok(Response::completed())
    }
}
