use serde::{Deserialize, Serialize};

// ============================================================================
// Inbound: Telegram update payload
// ============================================================================

/// An event delivered by Telegram to the webhook. Only the fields the bot
/// acts on are modeled; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ChatType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    Private,
    Group,
    Supergroup,
    /// Channels and any chat type Telegram adds later.
    #[serde(other)]
    Other,
}

// ============================================================================
// Inbound: search API response
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_files: u64,
    /// Individual file records. Only emptiness matters to the bot; the
    /// records themselves are rendered by the web results page.
    pub files: Vec<serde_json::Value>,
}

// ============================================================================
// Outbound: message to Telegram
// ============================================================================

/// A message to send via the Telegram Bot API. Built fresh per request.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub reply_to_message_id: Option<i64>,
}

impl OutboundMessage {
    #[must_use]
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            reply_markup: None,
            reply_to_message_id: None,
        }
    }

    #[must_use]
    pub fn with_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    #[must_use]
    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub url: String,
}

impl InlineKeyboardMarkup {
    /// A keyboard holding a single URL button.
    #[must_use]
    pub fn single_url_button(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: text.into(),
                url: url.into(),
            }]],
        }
    }
}
