//! LoginWatch - failed-login alert trigger
//!
//! Reads log events (a stream of JSON documents) from a file or stdin, sends
//! an SNS alert for every failed login, and prints one response per event.

use anyhow::{bail, Context, Result};
use clap::Parser;
use loginwatch::{app::App, cli::Cli, config::Config};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = match Config::load(&cli) {
        Ok(config) => config,
        Err(err) => {
            init_tracing("info");
            error!("Failed to load configuration: {:#}", err);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);

    info!("LoginWatch starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!("Dry Run: {}", config.dry_run);
    info!("SNS Topic: {}", config.sns.topic_arn);
    info!("SNS Region: {}", config.sns.region);
    info!(
        "SNS Endpoint: {}",
        config.sns.endpoint_url().unwrap_or("default")
    );
    info!(
        "Credentials: {}",
        if config.sns.static_credentials().is_some() {
            "static"
        } else {
            "default provider chain"
        }
    );
    info!("Match Pattern: {:?}", config.alert.match_pattern);
    info!("-------------------------------------------------------");

    let app = App::builder(config).build().await?;

    let summary = match &cli.event {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open event file {}", path.display()))?;
            app.run(file, tokio::io::stdout()).await?
        }
        None => app.run(tokio::io::stdin(), tokio::io::stdout()).await?,
    };

    if summary.failures > 0 {
        bail!(
            "{} of {} invocation(s) failed",
            summary.failures,
            summary.invocations
        );
    }

    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr; stdout carries the responses.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
