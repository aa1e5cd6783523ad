//! # Shovel Core
//!
//! The requeue engine: drains a source queue and re-enqueues each message
//! on a destination queue, deleting the source copy only after a
//! confirmed re-send.
//!
//! The engine favors at-least-once delivery: a failure between a
//! successful send and its matching delete leaves a duplicate on the
//! source queue, to be redelivered on a later run.
//!
//! ## Module Organization
//!
//! - [`config`] - Transfer options and the injectable factory boundary
//! - [`engine`] - The receive/send/delete control loop
//! - [`error`] - Engine error taxonomy with ordered diagnostic context

pub mod config;
pub mod engine;
pub mod error;

pub use config::TransferOptions;
pub use engine::{transfer, transfer_with_options, TransferSummary};
pub use error::TransferError;
