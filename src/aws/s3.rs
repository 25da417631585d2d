//! S3 bucket notification configuration

use aws_config::SdkConfig;
use aws_sdk_s3::types::{Event, NotificationConfiguration, TopicConfiguration};
use aws_sdk_s3::Client;
use tracing::debug;

use crate::error::ProviderError;

/// S3 client for wiring bucket events to the topic
pub struct S3Client {
    client: Client,
}

impl S3Client {
    /// Create a new S3 client from the shared SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    /// Point the bucket's event notifications at the topic.
    ///
    /// This replaces the bucket's entire notification configuration: any
    /// queue, topic, or function targets configured before are dropped.
    pub async fn put_topic_notification(
        &self,
        bucket: &str,
        topic_arn: &str,
        events: &[String],
    ) -> Result<(), ProviderError> {
        let topic_config = TopicConfiguration::builder()
            .topic_arn(topic_arn)
            .set_events(Some(events.iter().map(|e| Event::from(e.as_str())).collect()))
            .build()
            .map_err(|e| {
                ProviderError::other("PutBucketNotificationConfiguration", e.to_string())
            })?;

        let notification = NotificationConfiguration::builder()
            .topic_configurations(topic_config)
            .build();

        debug!(bucket = %bucket, topic_arn = %topic_arn, ?events, "registering bucket notification");

        self.client
            .put_bucket_notification_configuration()
            .bucket(bucket)
            .notification_configuration(notification)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("PutBucketNotificationConfiguration", e))?;

        Ok(())
    }

    /// Read back the bucket's topic notification targets
    pub async fn topic_notifications(
        &self,
        bucket: &str,
    ) -> Result<Vec<TopicConfiguration>, ProviderError> {
        let response = self
            .client
            .get_bucket_notification_configuration()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetBucketNotificationConfiguration", e))?;

        Ok(response.topic_configurations().to_vec())
    }
}
