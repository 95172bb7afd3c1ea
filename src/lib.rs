//! LoginWatch - failed-login alerting for log event batches
//!
//! This library scans batches of log records for failed login attempts and
//! publishes an alert to an SNS topic for each one it finds.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod error;
pub mod formatting;
pub mod matching;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;
pub use dispatcher::AlertDispatcher;
pub use error::{DispatchError, PublishError};
