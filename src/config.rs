//! Configuration and fixed names for a provisioning run

/// Name of the queue that receives object-created notifications
pub const QUEUE_NAME: &str = "foo_queue";

/// Name of the topic the bucket publishes to
pub const TOPIC_NAME: &str = "foo_topic";

/// Delivery delay applied to the queue, in seconds
pub const QUEUE_DELAY_SECONDS: u32 = 60;

/// How long the queue retains messages, in seconds (one day)
pub const QUEUE_RETENTION_SECONDS: u32 = 86_400;

/// Bucket events forwarded to the topic
pub const OBJECT_CREATED_EVENTS: &[&str] = &["s3:ObjectCreated:*"];

/// Environment variable selecting the AWS region; unset falls back to the
/// SDK's own resolution chain
pub const REGION_ENV: &str = "AWS_REGION";

/// Configuration for one provisioning run
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Bucket whose object-created events feed the pipeline
    pub bucket: String,

    /// Queue to create and subscribe
    pub queue_name: String,

    /// Topic to create between the bucket and the queue
    pub topic_name: String,

    /// Event names registered on the bucket
    pub events: Vec<String>,
}

impl ProvisionConfig {
    /// Build a run configuration for the given bucket with the fixed
    /// queue/topic names and event set
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            queue_name: QUEUE_NAME.to_string(),
            topic_name: TOPIC_NAME.to_string(),
            events: OBJECT_CREATED_EVENTS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_names() {
        let config = ProvisionConfig::new("my-bucket");
        assert_eq!(config.bucket, "my-bucket");
        assert_eq!(config.queue_name, "foo_queue");
        assert_eq!(config.topic_name, "foo_topic");
        assert_eq!(config.events, vec!["s3:ObjectCreated:*"]);
    }

    #[test]
    fn test_queue_attribute_values() {
        // These values end up as string attributes on CreateQueue
        assert_eq!(QUEUE_DELAY_SECONDS.to_string(), "60");
        assert_eq!(QUEUE_RETENTION_SECONDS.to_string(), "86400");
    }
}
