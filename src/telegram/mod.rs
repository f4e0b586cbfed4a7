//! Telegram Bot API client

pub mod client;

pub use client::{TelegramApi, TelegramClient, WebhookAck};
