//! Telegram Bot API client module
//!
//! Encapsulates the two Bot API calls the bot makes: `sendMessage` and
//! `setWebhook`. Both go through a process-wide reqwest client.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::models::OutboundMessage;
use crate::errors::BotError;
use crate::utils::http::http_client;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Wire body for `sendMessage`. Optional fields are omitted entirely rather
/// than sent as nulls; `reply_markup` is a JSON-encoded string per the Bot API.
#[derive(Debug, Serialize)]
struct SendMessageRequest {
    chat_id: i64,
    text: String,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
}

/// Telegram's acknowledgment of a `setWebhook` call. The raw body is kept
/// verbatim so the setup route can surface it to the operator.
#[derive(Debug, Clone)]
pub struct WebhookAck {
    pub ok: bool,
    pub raw: String,
}

/// Capability for talking to the Telegram Bot API. Handlers depend on this
/// trait so tests can substitute a recording fake.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the HTTP call fails or Telegram rejects the message.
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), BotError>;

    /// # Errors
    ///
    /// Returns an error if the HTTP call itself fails. A `drop_pending_updates`
    /// flag is always set so stale queued updates are discarded on re-register.
    async fn set_webhook(&self, target_url: &str) -> Result<WebhookAck, BotError>;
}

/// Production Telegram client authenticated with the bot token.
pub struct TelegramClient {
    token: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{TELEGRAM_API_BASE}/bot{}/{method}", self.token)
    }
}

#[async_trait]
impl TelegramApi for TelegramClient {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), BotError> {
        let reply_markup = match &message.reply_markup {
            Some(markup) => Some(serde_json::to_string(markup)?),
            None => None,
        };

        let request = SendMessageRequest {
            chat_id: message.chat_id,
            text: message.text.clone(),
            parse_mode: "HTML",
            reply_markup,
            reply_to_message_id: message.reply_to_message_id,
        };

        let response = http_client()
            .post(self.method_url("sendMessage"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::TelegramApi(format!(
                "sendMessage returned {status}: {body}"
            )));
        }

        Ok(())
    }

    async fn set_webhook(&self, target_url: &str) -> Result<WebhookAck, BotError> {
        let url = format!(
            "{}?url={}&drop_pending_updates=true",
            self.method_url("setWebhook"),
            urlencoding::encode(target_url)
        );

        let response = http_client().get(url).send().await?;
        let raw = response.text().await?;

        // Telegram answers {"ok": bool, ...}; treat unparseable bodies as failure
        let ok = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|v| v.get("ok").and_then(Value::as_bool))
            .unwrap_or(false);

        Ok(WebhookAck { ok, raw })
    }
}
