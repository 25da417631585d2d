//! Sequential provisioning of the bucket -> topic -> queue pipeline

use aws_config::SdkConfig;
use tracing::info;

use crate::aws::{S3Client, SnsClient, SqsClient};
use crate::config::ProvisionConfig;
use crate::error::ProviderError;
use crate::policy::PolicyDocument;

/// Identifiers of the resources wired together by a successful run
#[derive(Debug, Clone)]
pub struct ProvisionedPipeline {
    pub queue_url: String,
    pub queue_arn: String,
    pub topic_arn: String,
}

/// Run the provisioning sequence for one bucket.
///
/// Steps run strictly in order, each feeding its output to the next; the
/// first failure aborts the remainder and is returned unchanged. Resources
/// created before the failure are left in place; there is no rollback.
pub async fn run(
    config: &ProvisionConfig,
    sdk: &SdkConfig,
) -> Result<ProvisionedPipeline, ProviderError> {
    let sqs = SqsClient::new(sdk);
    let sns = SnsClient::new(sdk);
    let s3 = S3Client::new(sdk);

    let queue_url = sqs.create_queue(&config.queue_name).await?;
    info!(queue_url = %queue_url, "queue created");

    let queue_arn = sqs.queue_arn(&queue_url).await?;
    info!(queue_arn = %queue_arn, "queue ARN resolved");

    let topic_arn = sns.create_topic(&config.topic_name).await?;
    info!(topic_arn = %topic_arn, "topic created");

    sns.subscribe_queue(&topic_arn, &queue_arn).await?;
    info!(topic_arn = %topic_arn, queue_arn = %queue_arn, "queue subscribed to topic");

    let queue_policy = PolicyDocument::queue_send_policy(&queue_arn, &topic_arn);
    sqs.set_queue_policy(&queue_url, &queue_policy).await?;
    info!(queue_url = %queue_url, "topic allowed to send to queue");

    let topic_policy = PolicyDocument::topic_publish_policy(&topic_arn, &config.bucket);
    sns.set_topic_policy(&topic_arn, &topic_policy).await?;
    info!(topic_arn = %topic_arn, "bucket allowed to publish to topic");

    s3.put_topic_notification(&config.bucket, &topic_arn, &config.events)
        .await?;
    info!(bucket = %config.bucket, "object-created notifications registered");

    Ok(ProvisionedPipeline {
        queue_url,
        queue_arn,
        topic_arn,
    })
}
