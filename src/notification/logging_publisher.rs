//! A publisher that logs alerts instead of sending them.
//!
//! Used for `--dry-run` and for exercising the pipeline without AWS access.

use crate::core::Publisher;
use crate::error::PublishError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingPublisher {
    published: AtomicU64,
}

impl LoggingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages "published" so far.
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Publisher for LoggingPublisher {
    fn name(&self) -> &str {
        "dry-run"
    }

    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError> {
        let n = self.published.fetch_add(1, Ordering::SeqCst) + 1;
        info!(topic_arn, alert = message, "[dry-run] would publish alert");
        Ok(format!("dry-run-{n}"))
    }
}
