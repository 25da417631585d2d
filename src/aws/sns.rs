//! SNS topic management

use aws_config::SdkConfig;
use aws_sdk_sns::Client;
use tracing::debug;

use crate::error::ProviderError;
use crate::policy::PolicyDocument;

/// SNS client for managing the notification topic
pub struct SnsClient {
    client: Client,
}

impl SnsClient {
    /// Create a new SNS client from the shared SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Create the topic. Returns the topic ARN.
    pub async fn create_topic(&self, name: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("CreateTopic", e))?;

        let topic_arn = response
            .topic_arn()
            .ok_or_else(|| ProviderError::other("CreateTopic", "no topic ARN in response"))?;

        debug!(topic_arn = %topic_arn, "topic created");

        Ok(topic_arn.to_string())
    }

    /// Register the queue as an SQS-protocol endpoint of the topic.
    ///
    /// The confirmation payload is provider-defined; it is logged but never
    /// parsed for a subscription identifier.
    pub async fn subscribe_queue(
        &self,
        topic_arn: &str,
        queue_arn: &str,
    ) -> Result<(), ProviderError> {
        let response = self
            .client
            .subscribe()
            .topic_arn(topic_arn)
            .protocol("sqs")
            .endpoint(queue_arn)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("Subscribe", e))?;

        debug!(response = ?response, "queue subscribed to topic");

        Ok(())
    }

    /// Replace the topic's access policy with the given document.
    ///
    /// Any policy already attached to the topic is overwritten.
    pub async fn set_topic_policy(
        &self,
        topic_arn: &str,
        policy: &PolicyDocument,
    ) -> Result<(), ProviderError> {
        let document = serde_json::to_string(policy)
            .map_err(|e| ProviderError::other("SetTopicAttributes", e.to_string()))?;

        debug!(topic_arn = %topic_arn, policy = %document, "applying topic policy");

        self.client
            .set_topic_attributes()
            .topic_arn(topic_arn)
            .attribute_name("Policy")
            .attribute_value(document)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("SetTopicAttributes", e))?;

        Ok(())
    }

    /// Delete a topic by ARN
    pub async fn delete_topic(&self, topic_arn: &str) -> Result<(), ProviderError> {
        self.client
            .delete_topic()
            .topic_arn(topic_arn)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeleteTopic", e))?;

        debug!(topic_arn = %topic_arn, "topic deleted");

        Ok(())
    }
}
