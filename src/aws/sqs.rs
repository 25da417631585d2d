//! SQS queue management

use aws_config::SdkConfig;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use tracing::debug;

use crate::config::{QUEUE_DELAY_SECONDS, QUEUE_RETENTION_SECONDS};
use crate::error::ProviderError;
use crate::policy::PolicyDocument;

/// SQS client for managing the notification queue
pub struct SqsClient {
    client: Client,
}

impl SqsClient {
    /// Create a new SQS client from the shared SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Create the queue with the fixed delivery-delay and retention
    /// attributes. Returns the queue URL.
    pub async fn create_queue(&self, name: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .create_queue()
            .queue_name(name)
            .attributes(
                QueueAttributeName::DelaySeconds,
                QUEUE_DELAY_SECONDS.to_string(),
            )
            .attributes(
                QueueAttributeName::MessageRetentionPeriod,
                QUEUE_RETENTION_SECONDS.to_string(),
            )
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("CreateQueue", e))?;

        let queue_url = response
            .queue_url()
            .ok_or_else(|| ProviderError::other("CreateQueue", "no queue URL in response"))?;

        debug!(queue_url = %queue_url, "queue created");

        Ok(queue_url.to_string())
    }

    /// Resolve the queue's ARN from its URL
    pub async fn queue_arn(&self, queue_url: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetQueueAttributes", e))?;

        let arn = response
            .attributes()
            .and_then(|attrs| attrs.get(&QueueAttributeName::QueueArn))
            .ok_or_else(|| {
                ProviderError::other("GetQueueAttributes", "QueueArn attribute missing")
            })?;

        Ok(arn.clone())
    }

    /// Replace the queue's access policy with the given document.
    ///
    /// Any policy already attached to the queue is overwritten.
    pub async fn set_queue_policy(
        &self,
        queue_url: &str,
        policy: &PolicyDocument,
    ) -> Result<(), ProviderError> {
        let document = serde_json::to_string(policy)
            .map_err(|e| ProviderError::other("SetQueueAttributes", e.to_string()))?;

        debug!(queue_url = %queue_url, policy = %document, "applying queue policy");

        self.client
            .set_queue_attributes()
            .queue_url(queue_url)
            .attributes(QueueAttributeName::Policy, document)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("SetQueueAttributes", e))?;

        Ok(())
    }

    /// Look up the URL of an existing queue by name
    pub async fn queue_url(&self, name: &str) -> Result<String, ProviderError> {
        let response = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetQueueUrl", e))?;

        let queue_url = response
            .queue_url()
            .ok_or_else(|| ProviderError::other("GetQueueUrl", "no queue URL in response"))?;

        Ok(queue_url.to_string())
    }

    /// List the URLs of all queues visible to the caller
    pub async fn list_queues(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .list_queues()
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("ListQueues", e))?;

        Ok(response.queue_urls().to_vec())
    }

    /// Delete a queue by URL
    pub async fn delete_queue(&self, queue_url: &str) -> Result<(), ProviderError> {
        self.client
            .delete_queue()
            .queue_url(queue_url)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeleteQueue", e))?;

        debug!(queue_url = %queue_url, "queue deleted");

        Ok(())
    }
}
