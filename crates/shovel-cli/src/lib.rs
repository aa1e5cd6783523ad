//! Command-line interface for queue-shovel.
//!
//! Owns everything the engine treats as external: flag parsing, log-level
//! configuration, and exit-code translation. The engine itself is driven
//! through [`execute`], which accepts an optional factory override so
//! tests run against the in-memory provider.

use clap::Parser;
use shovel_core::{transfer_with_options, TransferError, TransferOptions, TransferSummary};
use shovel_runtime::ClientFactory;
use std::sync::Arc;
use tracing::{warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

// ============================================================================
// CLI Structure
// ============================================================================

/// Move every message from a source SQS queue to a destination SQS queue
#[derive(Debug, Parser)]
#[command(name = "queue-shovel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Moves messages from one SQS queue to another")]
pub struct Cli {
    /// Source queue URL
    #[arg(short = 's', long, env = "SHOVEL_SRC_QUEUE")]
    pub src_queue: String,

    /// Destination queue URL
    #[arg(short = 'd', long, env = "SHOVEL_DST_QUEUE")]
    pub dst_queue: String,

    /// Log level [DEBUG|INFO|WARN|ERROR]
    #[arg(short = 'l', long, default_value = "INFO")]
    pub log_level: String,

    /// Stop after this many messages (0 = unlimited)
    #[arg(short = 'm', long, default_value_t = 0)]
    pub message_limit: usize,
}

// ============================================================================
// Logging
// ============================================================================

/// Map the flag value to a tracing level.
///
/// Unrecognized values fall back to INFO; the second element tells the
/// caller to log a warning once the subscriber is installed.
pub fn resolve_log_level(value: &str) -> (Level, bool) {
    match value.to_uppercase().as_str() {
        "DEBUG" => (Level::DEBUG, false),
        "INFO" => (Level::INFO, false),
        "WARN" => (Level::WARN, false),
        "ERROR" => (Level::ERROR, false),
        _ => (Level::INFO, true),
    }
}

fn initialize_logging(level: Level) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

// ============================================================================
// Execution
// ============================================================================

/// Run a transfer for parsed arguments.
///
/// The factory override keeps tests off the network; `None` uses the
/// production SQS factory.
pub async fn execute(
    cli: &Cli,
    factory: Option<Arc<dyn ClientFactory>>,
) -> Result<TransferSummary, TransferError> {
    let mut options = TransferOptions::new().with_message_limit(cli.message_limit);
    if let Some(factory) = factory {
        options = options.with_factory(factory);
    }

    transfer_with_options(&cli.src_queue, &cli.dst_queue, options).await
}

/// Parse process arguments, initialize logging, and run the transfer
pub async fn run_cli() -> Result<TransferSummary, TransferError> {
    let cli = Cli::parse();

    let (level, unrecognized) = resolve_log_level(&cli.log_level);
    initialize_logging(level);
    if unrecognized {
        warn!(level = %cli.log_level, "unrecognized log level, using INFO");
    }

    execute(&cli, None).await
}

/// Process exit code for a failed transfer, one per error kind
pub fn exit_code(err: &TransferError) -> i32 {
    match err {
        TransferError::InvalidAddress { .. } => 1,
        TransferError::ClientConstructionFailed { .. } => 2,
        TransferError::ReceiveFailed { .. } => 3,
        TransferError::SendFailed { .. } => 4,
        TransferError::DeleteFailed { .. } => 5,
    }
}
