//! Handler for the webhook setup route.
//!
//! Registers this deployment's public URL with Telegram so updates get
//! delivered here. Re-running it with the same target simply re-registers.

use serde_json::Value;
use tracing::{error, info};

use super::helpers;
use crate::core::config::AppConfig;
use crate::telegram::TelegramApi;

/// Register the configured worker URL as the Telegram webhook target.
///
/// The raw upstream JSON is embedded in the response body either way so an
/// operator hitting the route from a browser can see what Telegram said.
pub async fn register(config: &AppConfig, telegram: &dyn TelegramApi) -> Value {
    let Some(worker_url) = config.worker_url.as_deref() else {
        error!("Webhook registration failed: WORKER_URL is not configured");
        return helpers::text_response(500, "WORKER_URL is not set");
    };

    match telegram.set_webhook(worker_url).await {
        Ok(ack) if ack.ok => {
            info!(target_url = %worker_url, "Webhook registered");
            helpers::text_response(
                200,
                &format!("Webhook registered for {worker_url}\n{}", ack.raw),
            )
        }
        Ok(ack) => {
            error!(target_url = %worker_url, response = %ack.raw, "Telegram rejected webhook registration");
            helpers::text_response(500, &format!("Failed to register webhook\n{}", ack.raw))
        }
        Err(e) => {
            error!("Webhook registration call failed: {}", e);
            helpers::text_response(500, &format!("Failed to register webhook: {e}"))
        }
    }
}
