//! The receive/send/delete control loop.
//!
//! The loop is a three-state machine: `Running` until a poll comes back
//! empty or the configured limit is hit (`Done`), or any step errors
//! (`Failed`). One capability call is in flight at a time; there is no
//! pipelining, batching beyond a single poll, or internal retry.

use crate::config::TransferOptions;
use crate::error::TransferError;
use shovel_runtime::{
    ClientFactory, QueueClient, QueueEndpoint, ReceivedMessage, SqsClientFactory,
};
use std::sync::Arc;
use tracing::{debug, info};

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

/// Outcome of a completed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSummary {
    /// Messages durably transferred: sent to the destination and deleted
    /// from the source
    pub forwarded: usize,
}

enum EngineState {
    Running,
    Done,
    Failed(TransferError),
}

/// Transfer every available message with default options
pub async fn transfer(
    src_queue_url: &str,
    dst_queue_url: &str,
) -> Result<TransferSummary, TransferError> {
    transfer_with_options(src_queue_url, dst_queue_url, TransferOptions::default()).await
}

/// Drain the source queue into the destination queue.
///
/// Each message is deleted from the source only after its send to the
/// destination succeeded. A failure between send and delete therefore
/// leaves the message on both queues; the duplicate is redelivered on a
/// later run.
pub async fn transfer_with_options(
    src_queue_url: &str,
    dst_queue_url: &str,
    options: TransferOptions,
) -> Result<TransferSummary, TransferError> {
    info!(
        src = src_queue_url,
        dst = dst_queue_url,
        "starting queue transfer"
    );

    // Both addresses must resolve before any client is constructed.
    let source = QueueEndpoint::parse(src_queue_url).map_err(|cause| {
        TransferError::InvalidAddress {
            url: src_queue_url.to_string(),
            cause,
        }
    })?;
    let destination = QueueEndpoint::parse(dst_queue_url).map_err(|cause| {
        TransferError::InvalidAddress {
            url: dst_queue_url.to_string(),
            cause,
        }
    })?;

    let limit = options.message_limit;
    let factory: Arc<dyn ClientFactory> = options
        .factory
        .unwrap_or_else(|| Arc::new(SqsClientFactory::new()));

    let source_client = factory.create_client(source.region()).await.map_err(|cause| {
        TransferError::ClientConstructionFailed {
            region: source.region().to_string(),
            cause,
        }
    })?;
    let destination_client =
        factory
            .create_client(destination.region())
            .await
            .map_err(|cause| TransferError::ClientConstructionFailed {
                region: destination.region().to_string(),
                cause,
            })?;

    let session = TransferSession {
        source,
        destination,
        source_client,
        destination_client,
        limit,
        seen: 0,
        forwarded: 0,
    };
    session.run().await
}

/// Per-invocation state: endpoints, clients, and counters. Dropped at
/// loop termination; nothing persists between invocations.
struct TransferSession {
    source: QueueEndpoint,
    destination: QueueEndpoint,
    source_client: Arc<dyn QueueClient>,
    destination_client: Arc<dyn QueueClient>,
    /// 0 means unlimited
    limit: usize,
    /// Messages counted against the limit, incremented before the check
    seen: usize,
    /// Messages sent and deleted
    forwarded: usize,
}

impl TransferSession {
    async fn run(mut self) -> Result<TransferSummary, TransferError> {
        loop {
            match self.pump().await {
                EngineState::Running => continue,
                EngineState::Done => {
                    info!(forwarded = self.forwarded, "transfer complete");
                    return Ok(TransferSummary {
                        forwarded: self.forwarded,
                    });
                }
                EngineState::Failed(err) => return Err(err),
            }
        }
    }

    /// One poll of the source queue and the processing of its batch
    async fn pump(&mut self) -> EngineState {
        let batch = match self
            .source_client
            .receive_messages(self.source.url())
            .await
        {
            Ok(batch) => batch,
            Err(cause) => {
                return EngineState::Failed(TransferError::ReceiveFailed {
                    url: self.source.url().to_string(),
                    cause,
                })
            }
        };

        if batch.is_empty() {
            info!("no available message in source queue");
            return EngineState::Done;
        }
        debug!(messages = batch.len(), "received batch from source queue");

        for message in batch {
            self.seen += 1;
            if self.limit > 0 && self.limit < self.seen {
                // Hard stop: this message is neither sent nor deleted and
                // stays on the source for a later run.
                info!(count = self.seen, "message limit reached");
                return EngineState::Done;
            }

            if let Err(err) = self.forward(message).await {
                return EngineState::Failed(err);
            }
        }

        EngineState::Running
    }

    /// Send one message to the destination, then delete it from the
    /// source. Delete strictly follows a confirmed send.
    async fn forward(&mut self, message: ReceivedMessage) -> Result<(), TransferError> {
        debug!(
            body = %String::from_utf8_lossy(&message.body),
            "sending message to destination queue"
        );
        self.destination_client
            .send_message(self.destination.url(), message.message())
            .await
            .map_err(|cause| TransferError::SendFailed {
                url: self.destination.url().to_string(),
                cause,
            })?;

        self.source_client
            .delete_message(self.source.url(), &message.receipt_handle)
            .await
            .map_err(|cause| TransferError::DeleteFailed {
                url: self.source.url().to_string(),
                handle: message.receipt_handle.handle().to_string(),
                cause,
            })?;
        debug!(receipt = %message.receipt_handle, "deleted message from source queue");

        self.forwarded += 1;
        Ok(())
    }
}
