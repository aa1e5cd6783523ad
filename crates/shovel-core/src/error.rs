//! Engine error taxonomy.
//!
//! Every error is terminal for the invocation: the engine surfaces the
//! first failure and stops. Each variant carries the addresses and
//! identities a caller needs for diagnostics, exposed in a fixed order
//! through [`TransferError::context_fields`].

use shovel_runtime::{EndpointError, QueueError};
use thiserror::Error;

/// Error type for transfer invocations
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("invalid queue address: {url}")]
    InvalidAddress {
        url: String,
        #[source]
        cause: EndpointError,
    },

    #[error("failed to create queue client for region {region}")]
    ClientConstructionFailed {
        region: String,
        #[source]
        cause: QueueError,
    },

    #[error("failed to receive message from source queue")]
    ReceiveFailed {
        url: String,
        #[source]
        cause: QueueError,
    },

    #[error("failed to send message to destination queue")]
    SendFailed {
        url: String,
        #[source]
        cause: QueueError,
    },

    #[error("failed to delete message from source queue")]
    DeleteFailed {
        url: String,
        handle: String,
        #[source]
        cause: QueueError,
    },
}

impl TransferError {
    /// Diagnostic context as ordered key/value pairs.
    ///
    /// The order is fixed per variant so log output stays deterministic.
    pub fn context_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::InvalidAddress { url, .. } => vec![("url", url.clone())],
            Self::ClientConstructionFailed { region, .. } => vec![("region", region.clone())],
            Self::ReceiveFailed { url, .. } => vec![("url", url.clone())],
            Self::SendFailed { url, .. } => vec![("url", url.clone())],
            Self::DeleteFailed { url, handle, .. } => {
                vec![("url", url.clone()), ("handle", handle.clone())]
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
