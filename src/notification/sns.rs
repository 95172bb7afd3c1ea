//! A publisher that sends alerts to an AWS SNS topic.

use crate::config::SnsConfig;
use crate::core::Publisher;
use crate::error::PublishError;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_sns::config::Region;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::{debug, info, instrument};

/// SNS-backed `Publisher`. Build it once and share it; the SDK client pools
/// its connections internally.
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    /// Creates a new `SnsPublisher` from the SNS section of the config.
    ///
    /// Credentials come from the default AWS provider chain unless a static
    /// key pair is configured.
    pub async fn new(config: &SnsConfig) -> Self {
        let region = Region::new(config.region.clone());
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .load()
            .await;

        let mut sns_config = aws_sdk_sns::config::Builder::from(&sdk_config);

        if let Some((key_id, secret)) = config.static_credentials() {
            let session_token = config
                .session_token
                .clone()
                .filter(|token| !token.is_empty());
            let creds = Credentials::new(key_id, secret, session_token, None, "loginwatch-static");
            sns_config = sns_config.credentials_provider(creds);
        }

        if let Some(endpoint) = config.endpoint_url() {
            sns_config = sns_config.endpoint_url(normalize_endpoint(endpoint));
        }

        info!(
            region = %config.region,
            endpoint = config.endpoint_url().unwrap_or("default"),
            "SNS publisher initialized"
        );

        Self::from_client(Client::from_conf(sns_config.build()))
    }

    /// Wraps an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Adds an `https://` scheme to a bare host.
fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    }
}

#[async_trait]
impl Publisher for SnsPublisher {
    fn name(&self) -> &str {
        "sns"
    }

    #[instrument(skip(self, message), fields(len = message.len()))]
    async fn publish(&self, topic_arn: &str, message: &str) -> Result<String, PublishError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| PublishError::Sdk(DisplayErrorContext(&e).to_string()))?;

        let message_id = output
            .message_id()
            .ok_or_else(|| PublishError::Rejected("SNS returned no message id".to_string()))?
            .to_string();
        debug!(message_id = %message_id, "SNS accepted message");
        Ok(message_id)
    }
}
