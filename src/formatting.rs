// src/formatting.rs

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::Value;
use std::io;

/// The text placed in front of every matching message.
pub const DEFAULT_ALERT_PREFIX: &str = "Alert: Unusual login activity detected! \n\n";

/// A trait for turning a matching log message into an alert body.
pub trait AlertFormatter: Send + Sync {
    fn format(&self, message: &str) -> String;
}

/// Prepends a fixed banner to the verbatim log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAlertFormatter {
    prefix: String,
}

impl LoginAlertFormatter {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoginAlertFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_PREFIX)
    }
}

impl AlertFormatter for LoginAlertFormatter {
    fn format(&self, message: &str) -> String {
        let mut body = String::with_capacity(self.prefix.len() + message.len());
        body.push_str(&self.prefix);
        body.push_str(message);
        body
    }
}

/// Single-line JSON with `", "` between items and `": "` after keys.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Renders a raw event for the "Event Received" log line.
pub fn event_dump(event: &Value) -> String {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    match event.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(buf).unwrap_or_else(|_| event.to_string()),
        Err(_) => event.to_string(),
    }
}
