//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the application using the
//! `clap` crate. These arguments are parsed at startup and then merged on top
//! of the `loginwatch.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Tag, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Scans log events for failed logins and publishes alerts to an SNS topic.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read events from this file instead of stdin.
    #[arg(short, long, value_name = "FILE")]
    pub event: Option<PathBuf>,

    /// ARN of the SNS topic alerts are published to.
    #[arg(long, value_name = "ARN")]
    pub topic_arn: Option<String>,

    /// AWS region of the topic.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Override the SNS endpoint (e.g. http://localhost:4566).
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Log alerts instead of publishing them.
    #[arg(long)]
    pub dry_run: bool,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();
        let mut sns = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        // A bare flag can only switch dry-run on; leaving it off keeps
        // whatever the file or environment said.
        if self.dry_run {
            dict.insert("dry_run".into(), Value::from(true));
        }

        if let Some(arn) = &self.topic_arn {
            sns.insert("topic_arn".into(), Value::from(arn.clone()));
        }

        if let Some(region) = &self.region {
            sns.insert("region".into(), Value::from(region.clone()));
        }

        if let Some(url) = &self.endpoint_url {
            sns.insert("endpoint_url".into(), Value::from(url.clone()));
        }

        if !sns.is_empty() {
            dict.insert("sns".into(), Value::Dict(Tag::Default, sns));
        }

        let mut map = Map::new();
        map.insert(Profile::Default, dict);
        Ok(map)
    }
}
