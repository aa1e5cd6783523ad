//! Queue provider implementations.

pub mod aws;
pub mod memory;

pub use aws::{SqsClient, SqsClientFactory};
pub use memory::{
    CallLog, DeleteCall, InMemoryClient, InMemoryConfig, InMemoryFactory, ReceiveCall, SendCall,
};
