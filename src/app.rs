//! The local invocation environment, decoupled from the entry point.
//!
//! `App` owns the process-wide handles (publisher and dispatcher), built once
//! at startup, and feeds every event it reads through the same dispatcher.

use crate::{
    config::Config,
    core::{Publisher, Response},
    dispatcher::AlertDispatcher,
    error::DispatchError,
    notification::{LoggingPublisher, SnsPublisher},
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

/// The error envelope written for an invocation that failed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InvocationError {
    #[serde(rename = "errorType")]
    pub error_type: String,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl From<&DispatchError> for InvocationError {
    fn from(err: &DispatchError) -> Self {
        Self {
            error_type: err.kind().to_string(),
            error_message: err.to_string(),
        }
    }
}

/// Counts of what a run over an event stream did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub invocations: usize,
    pub failures: usize,
}

/// A handle to the built application.
pub struct App {
    dispatcher: Arc<AlertDispatcher>,
}

impl App {
    /// Creates a new `AppBuilder` to construct an `App`.
    pub fn builder(config: Config) -> AppBuilder {
        AppBuilder::new(config)
    }

    /// Runs a single invocation.
    pub async fn invoke(&self, event: &Value) -> Result<Response, DispatchError> {
        self.dispatcher.dispatch(event).await
    }

    /// Reads a stream of concatenated JSON events from `input`, dispatches each
    /// one in order and writes one JSON line per event to `output`: the
    /// response envelope on success, an `InvocationError` otherwise.
    ///
    /// A failed invocation does not stop the stream. Input that is not valid
    /// JSON does.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<RunSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut raw = String::new();
        input
            .read_to_string(&mut raw)
            .await
            .context("failed to read events")?;

        let mut summary = RunSummary::default();
        let stream = serde_json::Deserializer::from_str(&raw).into_iter::<Value>();

        for event in stream {
            let event = event.with_context(|| {
                format!("failed to parse event #{}", summary.invocations + 1)
            })?;
            summary.invocations += 1;

            let line = match self.invoke(&event).await {
                Ok(response) => serde_json::to_string(&response)?,
                Err(err) => {
                    summary.failures += 1;
                    error!(error = %err, "Invocation failed");
                    serde_json::to_string(&InvocationError::from(&err))?
                }
            };

            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }

        output.flush().await?;
        info!(
            invocations = summary.invocations,
            failures = summary.failures,
            "Event stream finished"
        );
        Ok(summary)
    }
}

/// Builder for the application.
///
/// Separates constructing the long-lived handles from running events, and
/// lets tests swap the publisher.
pub struct AppBuilder {
    config: Config,
    publisher_override: Option<Arc<dyn Publisher>>,
}

impl AppBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            publisher_override: None,
        }
    }

    /// Uses the given publisher instead of the one the config selects.
    pub fn publisher_override(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher_override = Some(publisher);
        self
    }

    /// Builds the publisher and dispatcher once.
    pub async fn build(self) -> Result<App> {
        let publisher: Arc<dyn Publisher> = match self.publisher_override {
            Some(publisher) => publisher,
            None if self.config.dry_run => {
                info!("Dry run enabled. Alerts will be logged, not published.");
                Arc::new(LoggingPublisher::new())
            }
            None => Arc::new(SnsPublisher::new(&self.config.sns).await),
        };

        let dispatcher = AlertDispatcher::from_config(publisher, &self.config)
            .context("failed to build alert dispatcher")?;

        Ok(App {
            dispatcher: Arc::new(dispatcher),
        })
    }
}
