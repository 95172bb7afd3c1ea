//! Configuration management for LoginWatch
//!
//! This module defines the main `Config` struct and its sub-structs. Settings
//! are layered with the `figment` crate: built-in defaults, then a
//! `loginwatch.toml` file, then `LOGINWATCH_` environment variables, then
//! command-line flags.

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::formatting::DEFAULT_ALERT_PREFIX;
use crate::matching::DEFAULT_MATCH_PATTERN;

/// The config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "loginwatch.toml";

/// The topic alerts are sent to unless configured otherwise.
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:ap-south-1:532839197548:ThreatAlerts";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application, used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log alerts instead of publishing them.
    #[serde(default)]
    pub dry_run: bool,
    /// Configuration for the SNS notification channel.
    pub sns: SnsConfig,
    /// Configuration for alert detection and formatting.
    pub alert: AlertConfig,
}

/// Configuration for the SNS notification channel.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SnsConfig {
    /// ARN of the topic alerts are published to.
    pub topic_arn: String,
    /// AWS region of the topic.
    pub region: String,
    /// Endpoint override, e.g. a LocalStack URL.
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Static credentials. When unset the default AWS credential chain is used.
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Configuration for alert detection and formatting.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AlertConfig {
    /// Case-sensitive phrase that marks a record as a failed login.
    pub match_pattern: String,
    /// Text placed in front of the original message in the alert body.
    pub prefix: String,
}

impl Config {
    /// Loads the application configuration, layering defaults, the config
    /// file, environment variables and command-line flags.
    ///
    /// An explicitly requested config file must exist; the implicit
    /// `loginwatch.toml` is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => {
                if !path.exists() {
                    bail!("config file not found: {}", path.display());
                }
                path.clone()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::load_from(&config_path, cli)
    }

    fn load_from(config_path: &Path, cli: &Cli) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // e.g. LOGINWATCH_DRY_RUN=true, LOGINWATCH_SNS__TOPIC_ARN=arn:...
            .merge(Env::prefixed("LOGINWATCH_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl SnsConfig {
    /// Returns the endpoint override, treating an empty string as unset.
    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Returns the static credential pair if both halves are configured.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.access_key_id, &self.secret_access_key) {
            (Some(key_id), Some(secret)) if !key_id.is_empty() && !secret.is_empty() => {
                Some((key_id.as_str(), secret.as_str()))
            }
            _ => None,
        }
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dry_run: false,
            sns: SnsConfig::default(),
            alert: AlertConfig::default(),
        }
    }
}

impl Default for SnsConfig {
    fn default() -> Self {
        Self {
            topic_arn: DEFAULT_TOPIC_ARN.to_string(),
            region: "ap-south-1".to_string(),
            endpoint_url: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            match_pattern: DEFAULT_MATCH_PATTERN.to_string(),
            prefix: DEFAULT_ALERT_PREFIX.to_string(),
        }
    }
}
