//! API Lambda handler - thin router that delegates to specialized handlers.
//!
//! This module handles:
//! - Configuration loading and the missing-credential guard
//! - The webhook setup route (delegated to `webhook` module)
//! - Telegram update POSTs (delegated to `update_handler` module)
//! - Everything else (static informational response)

use super::{helpers, update_handler, webhook};
use crate::core::config::AppConfig;
use crate::core::models::Update;
use crate::search::{SearchApi, SearchClient};
use crate::telegram::{TelegramApi, TelegramClient};
use lambda_runtime::{Error, LambdaEvent};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

pub use self::function_handler as handler;

/// Path suffix that triggers webhook registration with Telegram.
pub const REGISTER_WEBHOOK_PATH: &str = "/registerWebhook";

/// Lambda handler for the API entrypoint.
///
/// Routes requests to specialized handlers based on path and method.
///
/// # Errors
///
/// Never fails at the Lambda level: every outcome, including missing
/// configuration and malformed bodies, is expressed as a response payload
/// with the appropriate status code.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(
    event: LambdaEvent<serde_json::Value>,
) -> Result<impl Serialize, Error> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Config error: {}", e);
            return Ok(helpers::text_response(500, &e));
        }
    };

    let telegram = TelegramClient::new(&config.bot_token);
    let search = SearchClient::new(&config.search_api_base);

    Ok(route(&config, &event.payload, &telegram, &search).await)
}

/// Routes a raw request payload to the matching handler.
///
/// Separated from `function_handler` so tests can inject configuration and
/// fake API clients instead of touching the environment or the network.
pub async fn route(
    config: &AppConfig,
    payload: &Value,
    telegram: &dyn TelegramApi,
    search: &dyn SearchApi,
) -> Value {
    // ========================================================================
    // Setup route (any method)
    // ========================================================================

    if let Some(path) = helpers::request_path(payload) {
        info!(raw_path = %path, "Request path");

        if path.ends_with(REGISTER_WEBHOOK_PATH) {
            return webhook::register(config, telegram).await;
        }
    }

    // ========================================================================
    // Telegram update delivery
    // ========================================================================

    if helpers::request_method(payload) == "POST" {
        let body = match extract_body(payload) {
            Ok(b) => b,
            Err(response) => return response,
        };

        let update = match serde_json::from_str::<Update>(body) {
            Ok(update) => update,
            Err(e) => {
                error!("Failed to parse Telegram update: {}", e);
                return helpers::text_response(400, "Invalid request body");
            }
        };

        return update_handler::process(config, telegram, search, &update).await;
    }

    // ========================================================================
    // Anything else: static informational response
    // ========================================================================

    helpers::text_response(200, "Filescout bot webhook endpoint.")
}

fn extract_body(payload: &Value) -> Result<&str, Value> {
    let Some(body) = payload.get("body") else {
        error!("Request missing body");
        return Err(helpers::text_response(400, "Invalid request body"));
    };

    let Some(body_str) = body.as_str() else {
        error!("Request body is not a string");
        return Err(helpers::text_response(400, "Invalid request body"));
    };

    Ok(body_str)
}
