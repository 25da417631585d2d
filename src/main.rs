//! s3-notify: wire an S3 bucket's object-created events to an SQS queue via
//! an SNS topic.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use s3_notify::config::{ProvisionConfig, REGION_ENV};
use s3_notify::provision;

#[derive(Parser, Debug)]
#[command(name = "s3-notify")]
#[command(about = "Provision an S3 -> SNS -> SQS object-created notification pipeline")]
#[command(version)]
struct Args {
    /// Bucket whose object-created events feed the pipeline
    bucket: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Usage errors exit 1, not clap's default 2. --help and --version keep
    // their success status.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    info!(bucket = %args.bucket, "provisioning notification pipeline");

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Ok(region) = std::env::var(REGION_ENV) {
        loader = loader.region(aws_config::Region::new(region));
    }
    let sdk = loader.load().await;

    let config = ProvisionConfig::new(args.bucket);
    let pipeline = provision::run(&config, &sdk).await?;

    println!("queue URL: {}", pipeline.queue_url);
    println!("queue ARN: {}", pipeline.queue_arn);
    println!("topic ARN: {}", pipeline.topic_arn);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parses_bucket_argument() {
        let args = Args::try_parse_from(["s3-notify", "my-bucket"]).unwrap();
        assert_eq!(args.bucket, "my-bucket");
    }

    #[test]
    fn test_missing_bucket_is_a_usage_error() {
        let err = Args::try_parse_from(["s3-notify"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_extra_arguments_are_a_usage_error() {
        let err = Args::try_parse_from(["s3-notify", "my-bucket", "surplus"]).unwrap_err();
        assert!(err.use_stderr());
    }
}
