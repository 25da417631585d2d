//! Typed access-policy documents for the queue and topic
//!
//! Documents are built as structs and serialized to JSON only when applied
//! as a resource attribute. Two shapes exist: the queue policy letting the
//! topic send messages, and the topic policy letting the bucket publish.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Policy language version the pipeline was written against
const POLICY_VERSION: &str = "2008-10-17";

/// An access-policy document attached to a queue or topic.
///
/// Applying one replaces the resource's existing policy wholesale; there is
/// no merge with statements already present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "Version")]
    version: &'static str,
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Statement")]
    statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    #[serde(rename = "Sid")]
    sid: String,
    #[serde(rename = "Effect")]
    effect: &'static str,
    #[serde(rename = "Principal")]
    principal: Principal,
    #[serde(rename = "Action")]
    action: &'static str,
    #[serde(rename = "Resource")]
    resource: String,
    #[serde(rename = "Condition")]
    condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    #[serde(rename = "AWS")]
    aws: &'static str,
}

impl Principal {
    /// Any principal; access is constrained by the statement condition only
    fn any() -> Self {
        Self { aws: "*" }
    }
}

/// Source-ARN condition restricting who may use the granted action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Condition {
    /// Exact source-ARN match
    ArnEquals {
        #[serde(rename = "aws:SourceArn")]
        source_arn: String,
    },
    /// Wildcard source-ARN match
    ArnLike {
        #[serde(rename = "aws:SourceArn")]
        source_arn: String,
    },
}

/// Statement id derived from the issue time in milliseconds.
///
/// Two statements issued within the same millisecond collide; callers that
/// care must not issue policies back-to-back faster than the clock ticks.
fn statement_sid(issued_at: DateTime<Utc>) -> String {
    format!("Sid{}", issued_at.timestamp_millis())
}

/// Source-ARN pattern matching the bucket across all partitions, regions,
/// and accounts
fn bucket_source_pattern(bucket: &str) -> String {
    format!("arn:*:s3:*:*:{bucket}")
}

impl PolicyDocument {
    /// Policy letting the topic (and only it) send messages into the queue
    pub fn queue_send_policy(queue_arn: &str, topic_arn: &str) -> Self {
        Self::queue_send_policy_at(queue_arn, topic_arn, Utc::now())
    }

    fn queue_send_policy_at(queue_arn: &str, topic_arn: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            version: POLICY_VERSION,
            id: format!("{queue_arn}/SQSDefaultPolicy"),
            statement: vec![Statement {
                sid: statement_sid(issued_at),
                effect: "Allow",
                principal: Principal::any(),
                action: "SQS:SendMessage",
                resource: queue_arn.to_string(),
                condition: Condition::ArnEquals {
                    source_arn: topic_arn.to_string(),
                },
            }],
        }
    }

    /// Policy letting the bucket (matched by name, from any region or
    /// account) publish to the topic
    pub fn topic_publish_policy(topic_arn: &str, bucket: &str) -> Self {
        Self::topic_publish_policy_at(topic_arn, bucket, Utc::now())
    }

    fn topic_publish_policy_at(topic_arn: &str, bucket: &str, issued_at: DateTime<Utc>) -> Self {
        Self {
            version: POLICY_VERSION,
            id: format!("{topic_arn}/SNSDefaultPolicy"),
            statement: vec![Statement {
                sid: statement_sid(issued_at),
                effect: "Allow",
                principal: Principal::any(),
                action: "SNS:Publish",
                resource: topic_arn.to_string(),
                condition: Condition::ArnLike {
                    source_arn: bucket_source_pattern(bucket),
                },
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const QUEUE_ARN: &str = "arn:aws:sqs:us-east-2:123456789012:foo_queue";
    const TOPIC_ARN: &str = "arn:aws:sns:us-east-2:123456789012:foo_topic";

    fn at_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_queue_policy_document_shape() {
        let policy = PolicyDocument::queue_send_policy_at(QUEUE_ARN, TOPIC_ARN, at_millis(1700000000000));

        let rendered = serde_json::to_value(&policy).unwrap();
        let expected = serde_json::json!({
            "Version": "2008-10-17",
            "Id": format!("{QUEUE_ARN}/SQSDefaultPolicy"),
            "Statement": [{
                "Sid": "Sid1700000000000",
                "Effect": "Allow",
                "Principal": { "AWS": "*" },
                "Action": "SQS:SendMessage",
                "Resource": QUEUE_ARN,
                "Condition": {
                    "ArnEquals": { "aws:SourceArn": TOPIC_ARN }
                }
            }]
        });

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_topic_policy_document_shape() {
        let policy = PolicyDocument::topic_publish_policy_at(TOPIC_ARN, "my-bucket", at_millis(1700000000000));

        let rendered = serde_json::to_value(&policy).unwrap();
        let expected = serde_json::json!({
            "Version": "2008-10-17",
            "Id": format!("{TOPIC_ARN}/SNSDefaultPolicy"),
            "Statement": [{
                "Sid": "Sid1700000000000",
                "Effect": "Allow",
                "Principal": { "AWS": "*" },
                "Action": "SNS:Publish",
                "Resource": TOPIC_ARN,
                "Condition": {
                    "ArnLike": { "aws:SourceArn": "arn:*:s3:*:*:my-bucket" }
                }
            }]
        });

        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_topic_policy_source_pattern_scoped_to_bucket() {
        assert_eq!(bucket_source_pattern("my-bucket"), "arn:*:s3:*:*:my-bucket");
    }

    #[test]
    fn test_statement_ids_differ_across_milliseconds() {
        let a = statement_sid(at_millis(1700000000000));
        let b = statement_sid(at_millis(1700000000001));
        assert_ne!(a, b);
    }

    #[test]
    fn test_statement_ids_collide_within_one_millisecond() {
        // Known weak point: the id has millisecond resolution, so documents
        // issued inside the same millisecond share a Sid.
        let a = statement_sid(at_millis(1700000000000));
        let b = statement_sid(at_millis(1700000000000));
        assert_eq!(a, b);
    }
}
