//! Handler for inbound Telegram updates.
//!
//! The flow is split in two: a pure decision step that classifies the update
//! into an [`Action`], and an effect step that performs the outbound calls.
//! The split keeps the filtering rules testable without any network.
//!
//! The response is always HTTP 200. Telegram redelivers updates on non-2xx
//! answers, and redelivery is never wanted here: failures are surfaced to the
//! chat as messages instead.

use serde_json::Value;
use tracing::{error, info};

use super::helpers;
use crate::core::config::AppConfig;
use crate::core::models::{ChatType, InlineKeyboardMarkup, OutboundMessage, Update};
use crate::errors::BotError;
use crate::search::SearchApi;
use crate::telegram::TelegramApi;
use crate::utils::text::escape_html;

/// Notice sent when the bot is messaged outside a group chat.
pub const PRIVATE_CHAT_NOTICE: &str = "I only work in group chats.";

/// Apology sent when the search or the reply delivery fails.
pub const SEARCH_FAILURE_APOLOGY: &str = "Sorry, something went wrong while searching.";

/// Label of the inline button linking to the web results page.
pub const VIEW_RESULTS_LABEL: &str = "View Results";

/// What an inbound update asks the bot to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Acknowledge and do nothing.
    Ack,
    /// Send a fixed notice to the chat.
    Notify { chat_id: i64, text: String },
    /// Run a file search and reply with the outcome.
    Search {
        chat_id: i64,
        message_id: i64,
        query: String,
    },
}

/// Classify an update. Pure function of the payload.
#[must_use]
pub fn decide(update: &Update) -> Action {
    // Ignore updates without message text (edits, joins, stickers, ...)
    let Some(message) = &update.message else {
        return Action::Ack;
    };
    let Some(text) = &message.text else {
        return Action::Ack;
    };

    match message.chat.kind {
        ChatType::Group | ChatType::Supergroup => {}
        ChatType::Private => {
            return Action::Notify {
                chat_id: message.chat.id,
                text: PRIVATE_CHAT_NOTICE.to_string(),
            };
        }
        ChatType::Other => return Action::Ack,
    }

    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.starts_with('/') {
        return Action::Ack;
    }

    Action::Search {
        chat_id: message.chat.id,
        message_id: message.message_id,
        query: trimmed.to_string(),
    }
}

/// Reply text for a non-empty result set.
#[must_use]
pub fn found_text(total_files: u64, query: &str) -> String {
    format!(
        "Found {total_files} result(s) for \"{}\".",
        escape_html(query)
    )
}

/// Reply text for an empty result set.
#[must_use]
pub fn no_results_text(query: &str) -> String {
    format!(
        "No results found for \"{}\". Please try a different search term.",
        escape_html(query)
    )
}

/// Inline keyboard linking to the web results page for the same query.
#[must_use]
pub fn results_keyboard(results_page_url: &str, query: &str) -> InlineKeyboardMarkup {
    let url = format!(
        "{results_page_url}?q={}&t=files",
        urlencoding::encode(query)
    );
    InlineKeyboardMarkup::single_url_button(VIEW_RESULTS_LABEL, url)
}

/// Process an inbound update. Always returns a 200 acknowledgment.
pub async fn process(
    config: &AppConfig,
    telegram: &dyn TelegramApi,
    search: &dyn SearchApi,
    update: &Update,
) -> Value {
    let action = decide(update);
    info!(update_id = update.update_id, action = ?action, "Processing update");

    let outcome = match action {
        Action::Ack => Ok(()),
        Action::Notify { chat_id, text } => {
            telegram
                .send_message(&OutboundMessage::new(chat_id, text))
                .await
        }
        Action::Search {
            chat_id,
            message_id,
            query,
        } => search_and_reply(config, telegram, search, chat_id, message_id, &query).await,
    };

    if let Err(e) = outcome {
        error!("Update processing failed: {}", e);
        if let Some(chat_id) = chat_id_of(update) {
            // Best effort; a failed apology is only logged
            let apology = OutboundMessage::new(chat_id, SEARCH_FAILURE_APOLOGY);
            if let Err(e) = telegram.send_message(&apology).await {
                error!("Failed to send apology message: {}", e);
            }
        }
    }

    helpers::ok_ack()
}

async fn search_and_reply(
    config: &AppConfig,
    telegram: &dyn TelegramApi,
    search: &dyn SearchApi,
    chat_id: i64,
    message_id: i64,
    query: &str,
) -> Result<(), BotError> {
    let result = search.search_files(query).await?;
    info!(
        total_files = result.total_files,
        query, "Search API responded"
    );

    let reply = if result.files.is_empty() {
        OutboundMessage::new(chat_id, no_results_text(query)).with_reply_to(message_id)
    } else {
        OutboundMessage::new(chat_id, found_text(result.total_files, query))
            .with_reply_to(message_id)
            .with_markup(results_keyboard(&config.results_page_url, query))
    };

    telegram.send_message(&reply).await
}

fn chat_id_of(update: &Update) -> Option<i64> {
    update.message.as_ref().map(|m| m.chat.id)
}
