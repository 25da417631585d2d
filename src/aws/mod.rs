//! AWS service clients

pub mod s3;
pub mod sns;
pub mod sqs;

pub use s3::S3Client;
pub use sns::SnsClient;
pub use sqs::SqsClient;
