//! Transfer options and the injectable client factory boundary.

use shovel_runtime::ClientFactory;
use std::sync::Arc;

/// Configuration for a single transfer invocation
#[derive(Clone, Default)]
pub struct TransferOptions {
    /// Stop after this many messages have been counted; 0 means unlimited
    pub message_limit: usize,

    /// Client factory override; `None` falls back to the production SQS
    /// factory
    pub factory: Option<Arc<dyn ClientFactory>>,
}

impl TransferOptions {
    /// Create options with defaults: unlimited, production factory
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message limit
    pub fn with_message_limit(mut self, limit: usize) -> Self {
        self.message_limit = limit;
        self
    }

    /// Inject a client factory
    pub fn with_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = Some(factory);
        self
    }
}

impl std::fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferOptions")
            .field("message_limit", &self.message_limit)
            .field("factory", &self.factory.as_ref().map(|_| "<injected>"))
            .finish()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
