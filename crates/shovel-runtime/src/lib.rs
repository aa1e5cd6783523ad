//! # Shovel Runtime
//!
//! Queue transport abstraction for queue-shovel with an AWS SQS provider and
//! an in-memory implementation for deterministic testing.
//!
//! This library provides:
//! - Queue endpoint parsing and region derivation
//! - Provider-agnostic send/receive/delete operations
//! - An injectable client factory boundary
//! - A call-recording in-memory provider for tests
//!
//! ## Module Organization
//!
//! - [`error`] - Error types for endpoint and transport operations
//! - [`message`] - Message structures and receipt handles
//! - [`endpoint`] - Queue endpoint parsing
//! - [`client`] - Client and factory traits
//! - [`providers`] - AWS SQS and in-memory implementations

// Module declarations
pub mod client;
pub mod endpoint;
pub mod error;
pub mod message;
pub mod providers;

// Re-export commonly used types at crate root for convenience
pub use client::{ClientFactory, QueueClient};
pub use endpoint::QueueEndpoint;
pub use error::{EndpointError, QueueError};
pub use message::{Message, MessageId, ReceiptHandle, ReceivedMessage};
pub use providers::{
    CallLog, InMemoryClient, InMemoryConfig, InMemoryFactory, SqsClient, SqsClientFactory,
};
