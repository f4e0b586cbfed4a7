/// Filescout - a Telegram bot that bridges group-chat messages to a file-search API.
///
/// This crate implements a single stateless Lambda for the Filescout bot:
/// 1. Telegram delivers message updates to the webhook endpoint as HTTP POSTs
/// 2. The handler classifies each update and, for plain group messages, queries
///    the file-search API and replies with a result summary and a link button
/// 3. A setup route registers the webhook URL with Telegram
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - reqwest for the Telegram Bot API and the search API
/// - Tokio for async runtime
///
/// There is no persistent state: every invocation is a pure function of the
/// inbound payload plus at most two sequential outbound HTTP calls.
// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod search;
pub mod telegram;
pub mod utils;

// Re-export the error type for convenience
pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called at the start of each Lambda
/// handler.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
