//! Error type for failed provider calls

use std::error::Error as StdError;

use aws_sdk_sqs::error::ProvideErrorMetadata;
use thiserror::Error;

/// Error returned by a provisioning step, wrapping whatever the remote API
/// reported.
///
/// Every step propagates this unchanged to the orchestrator; there is no
/// retry and no transient/permanent distinction. The provider's error code
/// is kept when one was returned.
#[derive(Debug, Error)]
#[error("{operation} failed{}: {message}", fmt_code(.code))]
pub struct ProviderError {
    operation: &'static str,
    code: Option<String>,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

fn fmt_code(code: &Option<String>) -> String {
    match code {
        Some(code) => format!(" ({code})"),
        None => String::new(),
    }
}

impl ProviderError {
    /// Wrap an AWS SDK error, keeping the provider's error code and message
    /// when the response carried them
    pub(crate) fn from_sdk<E>(operation: &'static str, source: E) -> Self
    where
        E: ProvideErrorMetadata + StdError + Send + Sync + 'static,
    {
        let code = source.code().map(str::to_owned);
        let message = source
            .message()
            .map(str::to_owned)
            .unwrap_or_else(|| source.to_string());

        Self {
            operation,
            code,
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Error raised locally, without a provider response (malformed input or
    /// an unexpected response shape)
    pub(crate) fn other(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            code: None,
            message: message.into(),
            source: None,
        }
    }

    /// The API operation that failed
    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Provider-side error code, if the response carried one
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}
