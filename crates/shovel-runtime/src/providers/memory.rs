//! In-memory queue provider for deterministic testing.
//!
//! Queues are keyed by URL and created on first use. Every capability
//! invocation is recorded with its arguments so tests can assert on the
//! exact call sequence. Failures can be injected per operation to
//! exercise error paths without a network.
//!
//! Delivery is simplified relative to a real queue service: a message is
//! delivered at most once (no visibility timeout or redelivery), which is
//! enough to model a single transfer invocation.

use crate::client::{ClientFactory, QueueClient};
use crate::error::QueueError;
use crate::message::{Message, MessageId, ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

// ============================================================================
// Call Recording
// ============================================================================

/// A recorded send invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCall {
    pub queue_url: String,
    pub body: Bytes,
}

/// A recorded receive invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiveCall {
    pub queue_url: String,
}

/// A recorded delete invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCall {
    pub queue_url: String,
    pub receipt: String,
}

/// Every capability invocation made against an [`InMemoryClient`],
/// in call order, including invocations that failed
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    pub sends: Vec<SendCall>,
    pub receives: Vec<ReceiveCall>,
    pub deletes: Vec<DeleteCall>,
}

// ============================================================================
// Configuration
// ============================================================================

/// In-memory provider configuration
#[derive(Debug, Clone)]
pub struct InMemoryConfig {
    /// Messages handed out per receive poll
    pub messages_per_poll: usize,
}

impl Default for InMemoryConfig {
    fn default() -> Self {
        Self {
            messages_per_poll: 1,
        }
    }
}

// ============================================================================
// Internal Storage
// ============================================================================

struct StoredMessage {
    message_id: MessageId,
    body: Bytes,
    /// Set once the message has been handed out by a receive poll
    receipt: Option<String>,
    deleted: bool,
}

#[derive(Default)]
struct InMemoryQueue {
    messages: Vec<StoredMessage>,
}

/// Per-operation failure budgets: `Some(n)` lets n calls succeed and
/// fails every call after that; `None` never fails
#[derive(Default)]
struct FailurePlan {
    sends_before_failure: Option<usize>,
    receives_before_failure: Option<usize>,
    deletes_before_failure: Option<usize>,
}

fn should_fail(budget: &mut Option<usize>) -> bool {
    match budget {
        Some(0) => true,
        Some(remaining) => {
            *remaining -= 1;
            false
        }
        None => false,
    }
}

struct Storage {
    queues: HashMap<String, InMemoryQueue>,
    calls: CallLog,
    failures: FailurePlan,
    config: InMemoryConfig,
}

impl Storage {
    fn queue_mut(&mut self, queue_url: &str) -> &mut InMemoryQueue {
        self.queues.entry(queue_url.to_string()).or_default()
    }
}

// ============================================================================
// InMemoryClient
// ============================================================================

/// Call-recording in-memory queue client
pub struct InMemoryClient {
    storage: RwLock<Storage>,
}

impl InMemoryClient {
    pub fn new(config: InMemoryConfig) -> Self {
        Self {
            storage: RwLock::new(Storage {
                queues: HashMap::new(),
                calls: CallLog::default(),
                failures: FailurePlan::default(),
                config,
            }),
        }
    }

    /// Seed a message onto a queue without recording a send call
    pub async fn push_message(&self, queue_url: &str, body: impl Into<Bytes>) {
        let mut storage = self.storage.write().await;
        storage.queue_mut(queue_url).messages.push(StoredMessage {
            message_id: MessageId::new(),
            body: body.into(),
            receipt: None,
            deleted: false,
        });
    }

    /// Bodies still on the queue from the service's perspective, i.e.
    /// everything not yet deleted, in enqueue order
    pub async fn queued_bodies(&self, queue_url: &str) -> Vec<Bytes> {
        let storage = self.storage.read().await;
        storage
            .queues
            .get(queue_url)
            .map(|queue| {
                queue
                    .messages
                    .iter()
                    .filter(|message| !message.deleted)
                    .map(|message| message.body.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Snapshot of every invocation recorded so far
    pub async fn calls(&self) -> CallLog {
        self.storage.read().await.calls.clone()
    }

    /// Let `successes` sends succeed, then fail every send after that
    pub async fn fail_sends_after(&self, successes: usize) {
        self.storage.write().await.failures.sends_before_failure = Some(successes);
    }

    /// Let `successes` receives succeed, then fail every receive after that
    pub async fn fail_receives_after(&self, successes: usize) {
        self.storage.write().await.failures.receives_before_failure = Some(successes);
    }

    /// Let `successes` deletes succeed, then fail every delete after that
    pub async fn fail_deletes_after(&self, successes: usize) {
        self.storage.write().await.failures.deletes_before_failure = Some(successes);
    }
}

impl Default for InMemoryClient {
    fn default() -> Self {
        Self::new(InMemoryConfig::default())
    }
}

#[async_trait]
impl QueueClient for InMemoryClient {
    async fn send_message(
        &self,
        queue_url: &str,
        message: Message,
    ) -> Result<MessageId, QueueError> {
        let mut storage = self.storage.write().await;
        storage.calls.sends.push(SendCall {
            queue_url: queue_url.to_string(),
            body: message.body.clone(),
        });

        if should_fail(&mut storage.failures.sends_before_failure) {
            return Err(QueueError::ConnectionFailed {
                message: "injected send failure".to_string(),
            });
        }

        let message_id = MessageId::new();
        storage.queue_mut(queue_url).messages.push(StoredMessage {
            message_id: message_id.clone(),
            body: message.body,
            receipt: None,
            deleted: false,
        });
        Ok(message_id)
    }

    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<ReceivedMessage>, QueueError> {
        let mut storage = self.storage.write().await;
        storage.calls.receives.push(ReceiveCall {
            queue_url: queue_url.to_string(),
        });

        if should_fail(&mut storage.failures.receives_before_failure) {
            return Err(QueueError::ConnectionFailed {
                message: "injected receive failure".to_string(),
            });
        }

        let batch_size = storage.config.messages_per_poll;
        let queue = storage.queue_mut(queue_url);

        let mut received = Vec::new();
        for message in queue
            .messages
            .iter_mut()
            .filter(|message| message.receipt.is_none() && !message.deleted)
            .take(batch_size)
        {
            let receipt = uuid::Uuid::new_v4().to_string();
            message.receipt = Some(receipt.clone());
            received.push(ReceivedMessage {
                message_id: message.message_id.clone(),
                body: message.body.clone(),
                receipt_handle: ReceiptHandle::new(receipt),
            });
        }

        Ok(received)
    }

    async fn delete_message(
        &self,
        queue_url: &str,
        receipt: &ReceiptHandle,
    ) -> Result<(), QueueError> {
        let mut storage = self.storage.write().await;
        storage.calls.deletes.push(DeleteCall {
            queue_url: queue_url.to_string(),
            receipt: receipt.handle().to_string(),
        });

        if should_fail(&mut storage.failures.deletes_before_failure) {
            return Err(QueueError::ConnectionFailed {
                message: "injected delete failure".to_string(),
            });
        }

        let queue = storage.queue_mut(queue_url);
        let target = queue.messages.iter_mut().find(|message| {
            !message.deleted && message.receipt.as_deref() == Some(receipt.handle())
        });

        match target {
            Some(message) => {
                message.deleted = true;
                Ok(())
            }
            None => Err(QueueError::MessageNotFound {
                receipt: receipt.handle().to_string(),
            }),
        }
    }
}

// ============================================================================
// InMemoryFactory
// ============================================================================

/// Factory handing out one shared [`InMemoryClient`] regardless of region.
///
/// Records every requested region so tests can assert which client
/// constructions happened (or that none did).
pub struct InMemoryFactory {
    client: Arc<InMemoryClient>,
    regions: Mutex<Vec<String>>,
    fail_construction: AtomicBool,
}

impl InMemoryFactory {
    pub fn new() -> Self {
        Self::with_client(Arc::new(InMemoryClient::default()))
    }

    pub fn with_client(client: Arc<InMemoryClient>) -> Self {
        Self {
            client,
            regions: Mutex::new(Vec::new()),
            fail_construction: AtomicBool::new(false),
        }
    }

    /// A factory whose `create_client` always fails
    pub fn failing() -> Self {
        let factory = Self::new();
        factory.fail_construction.store(true, Ordering::SeqCst);
        factory
    }

    /// The shared client handed out to callers
    pub fn client(&self) -> Arc<InMemoryClient> {
        self.client.clone()
    }

    /// Regions requested so far, in call order
    pub async fn created_regions(&self) -> Vec<String> {
        self.regions.lock().await.clone()
    }
}

impl Default for InMemoryFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientFactory for InMemoryFactory {
    async fn create_client(&self, region: &str) -> Result<Arc<dyn QueueClient>, QueueError> {
        if self.fail_construction.load(Ordering::SeqCst) {
            return Err(QueueError::ConfigurationError {
                message: format!("injected construction failure for region {}", region),
            });
        }

        self.regions.lock().await.push(region.to_string());
        Ok(self.client.clone())
    }
}
