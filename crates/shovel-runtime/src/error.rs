//! Error types for endpoint parsing and queue transport operations.

use thiserror::Error;

/// Errors raised while decomposing a queue endpoint address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("queue URL has fewer than 3 slash-separated segments: {url}")]
    TooFewSegments { url: String },

    #[error("queue URL host is not of the form service.region.provider.tld: {url}")]
    MalformedHost { url: String },
}

impl EndpointError {
    /// The offending address
    pub fn url(&self) -> &str {
        match self {
            Self::TooFewSegments { url } => url,
            Self::MalformedHost { url } => url,
        }
    }
}

/// Error type for all transport-level queue operations
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue not found: {queue_url}")]
    QueueNotFound { queue_url: String },

    #[error("Message not found or receipt expired: {receipt}")]
    MessageNotFound { receipt: String },

    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Message body is not valid UTF-8")]
    InvalidUtf8Body,

    #[error("Provider error ({provider}): {code} - {message}")]
    ProviderError {
        provider: String,
        code: String,
        message: String,
    },

    #[error("Client configuration error: {message}")]
    ConfigurationError { message: String },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
