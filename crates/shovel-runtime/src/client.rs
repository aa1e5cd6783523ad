//! Client and factory traits for queue operations.

use crate::error::QueueError;
use crate::message::{Message, MessageId, ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;

/// Capability set against a named queue: send, receive, delete.
///
/// Implementations are region-scoped; callers obtain one instance per
/// region through a [`ClientFactory`].
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Enqueue a new message on the queue
    async fn send_message(
        &self,
        queue_url: &str,
        message: Message,
    ) -> Result<MessageId, QueueError>;

    /// Perform one receive poll.
    ///
    /// An empty result is the normal "queue currently drained" signal,
    /// not an error.
    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<ReceivedMessage>, QueueError>;

    /// Acknowledge and remove the delivery identified by the receipt
    async fn delete_message(
        &self,
        queue_url: &str,
        receipt: &ReceiptHandle,
    ) -> Result<(), QueueError>;
}

/// Factory producing a queue client for a region.
///
/// This is the sole network-facing boundary: production code supplies an
/// SQS-backed factory, tests supply an in-memory one.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Create a client for the given region token
    async fn create_client(&self, region: &str) -> Result<Arc<dyn QueueClient>, QueueError>;
}
