use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to parse Telegram update: {0}")]
    ParseError(String),

    #[error("Failed to access Telegram API: {0}")]
    TelegramApi(String),

    #[error("Failed to access search API: {0}")]
    SearchApi(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}
