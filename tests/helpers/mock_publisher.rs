#![allow(dead_code)]
use async_trait::async_trait;
use loginwatch::core::Publisher;
use loginwatch::error::PublishError;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// A published message as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Published {
    pub topic_arn: String,
    pub message: String,
}

/// A mock Publisher that records every message it is asked to send.
#[derive(Clone, Debug, Default)]
pub struct RecordingPublisher {
    pub published: Arc<Mutex<Vec<Published>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.message.clone())
            .collect()
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    fn name(&self) -> &str {
        "recording_mock"
    }

    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError> {
        let mut published = self.published.lock().unwrap();
        published.push(Published {
            topic_arn: topic_arn.to_string(),
            message: message.to_string(),
        });
        Ok(format!("mock-{}", published.len()))
    }
}

/// A mock Publisher that succeeds a fixed number of times, then fails every call.
#[derive(Clone, Debug)]
pub struct FailingPublisher {
    pub succeed_first: usize,
    pub calls: Arc<AtomicUsize>,
    pub inner: RecordingPublisher,
}

impl FailingPublisher {
    pub fn after(succeed_first: usize) -> Self {
        Self {
            succeed_first,
            calls: Arc::new(AtomicUsize::new(0)),
            inner: RecordingPublisher::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for FailingPublisher {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.succeed_first {
            return Err(PublishError::Sdk("simulated SNS outage".to_string()));
        }
        self.inner.publish(topic_arn, message).await
    }
}
