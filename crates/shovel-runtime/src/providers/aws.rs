//! AWS SQS provider implementation.
//!
//! Wraps the AWS SDK SQS client behind the [`QueueClient`] capability set.
//! One client is constructed per region; the queue URL passed to each call
//! selects the queue within that region.

use crate::client::{ClientFactory, QueueClient};
use crate::error::QueueError;
use crate::message::{Message, MessageId, ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sqs::error::{ProvideErrorMetadata, SdkError};
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

#[cfg(test)]
#[path = "aws_tests.rs"]
mod tests;

const PROVIDER_NAME: &str = "AwsSqs";

/// Maximum messages SQS returns from a single receive poll
const MAX_RECEIVE_BATCH: i32 = 10;

const QUEUE_DOES_NOT_EXIST: &str = "AWS.SimpleQueueService.NonExistentQueue";
const RECEIPT_HANDLE_IS_INVALID: &str = "ReceiptHandleIsInvalid";

// ============================================================================
// Error Mapping
// ============================================================================

/// Classify an SQS error code into the transport error taxonomy
fn queue_error_from_code(queue_url: &str, code: Option<&str>, message: Option<&str>) -> QueueError {
    match code {
        Some(QUEUE_DOES_NOT_EXIST) | Some("QueueDoesNotExist") => QueueError::QueueNotFound {
            queue_url: queue_url.to_string(),
        },
        _ => QueueError::ProviderError {
            provider: PROVIDER_NAME.to_string(),
            code: code.unwrap_or("Unknown").to_string(),
            message: message.unwrap_or_default().to_string(),
        },
    }
}

fn map_sdk_error<E>(queue_url: &str, err: SdkError<E>) -> QueueError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    if matches!(err, SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)) {
        return QueueError::ConnectionFailed {
            message: err.to_string(),
        };
    }

    queue_error_from_code(queue_url, err.code(), err.message())
}

/// Extract the UTF-8 body SQS requires for transmission
fn utf8_body(message: &Message) -> Result<&str, QueueError> {
    std::str::from_utf8(&message.body).map_err(|_| QueueError::InvalidUtf8Body)
}

fn required_field<T>(value: Option<T>, name: &str) -> Result<T, QueueError> {
    value.ok_or_else(|| QueueError::ProviderError {
        provider: PROVIDER_NAME.to_string(),
        code: "MalformedMessage".to_string(),
        message: format!("received message is missing {}", name),
    })
}

// ============================================================================
// SqsClient
// ============================================================================

/// Region-scoped SQS client
pub struct SqsClient {
    client: aws_sdk_sqs::Client,
}

impl SqsClient {
    /// Wrap an already-constructed SDK client
    pub fn new(client: aws_sdk_sqs::Client) -> Self {
        Self { client }
    }

    /// Build a client for the given region from the ambient AWS environment
    pub async fn for_region(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(aws_sdk_sqs::Client::new(&config))
    }
}

#[async_trait]
impl QueueClient for SqsClient {
    async fn send_message(
        &self,
        queue_url: &str,
        message: Message,
    ) -> Result<MessageId, QueueError> {
        let body = utf8_body(&message)?.to_string();

        let output = self
            .client
            .send_message()
            .queue_url(queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|err| map_sdk_error(queue_url, err))?;

        let message_id = required_field(output.message_id, "message_id")?;
        Ok(MessageId::from(message_id))
    }

    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<ReceivedMessage>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(queue_url)
            .max_number_of_messages(MAX_RECEIVE_BATCH)
            .send()
            .await
            .map_err(|err| map_sdk_error(queue_url, err))?;

        let mut received = Vec::new();
        for message in output.messages.unwrap_or_default() {
            let message_id = required_field(message.message_id, "message_id")?;
            let body = required_field(message.body, "body")?;
            let receipt = required_field(message.receipt_handle, "receipt_handle")?;

            received.push(ReceivedMessage {
                message_id: MessageId::from(message_id),
                body: Bytes::from(body),
                receipt_handle: ReceiptHandle::new(receipt),
            });
        }

        debug!(queue_url, messages = received.len(), "received poll completed");
        Ok(received)
    }

    async fn delete_message(
        &self,
        queue_url: &str,
        receipt: &ReceiptHandle,
    ) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt.handle())
            .send()
            .await
            .map_err(|err| {
                if err.code() == Some(RECEIPT_HANDLE_IS_INVALID) {
                    QueueError::MessageNotFound {
                        receipt: receipt.handle().to_string(),
                    }
                } else {
                    map_sdk_error(queue_url, err)
                }
            })?;

        Ok(())
    }
}

// ============================================================================
// SqsClientFactory
// ============================================================================

/// Production factory: one SQS client per requested region
#[derive(Debug, Clone, Copy, Default)]
pub struct SqsClientFactory;

impl SqsClientFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientFactory for SqsClientFactory {
    async fn create_client(&self, region: &str) -> Result<Arc<dyn QueueClient>, QueueError> {
        debug!(region, "constructing SQS client");
        Ok(Arc::new(SqsClient::for_region(region).await))
    }
}
