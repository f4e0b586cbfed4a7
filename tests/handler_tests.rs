use std::sync::Mutex;

use async_trait::async_trait;
use filescout::api::handler::route;
use filescout::core::config::AppConfig;
use filescout::core::models::{OutboundMessage, SearchResponse};
use filescout::errors::BotError;
use filescout::search::SearchApi;
use filescout::telegram::{TelegramApi, WebhookAck};
use serde_json::{Value, json};

// ============================================================================
// Fakes
// ============================================================================

struct FakeTelegram {
    sent: Mutex<Vec<OutboundMessage>>,
    webhook_targets: Mutex<Vec<String>>,
    webhook_result: Result<WebhookAck, String>,
}

impl FakeTelegram {
    fn new() -> Self {
        Self::with_webhook_ack(true, r#"{"ok":true,"result":true}"#)
    }

    fn with_webhook_ack(ok: bool, raw: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            webhook_targets: Mutex::new(Vec::new()),
            webhook_result: Ok(WebhookAck {
                ok,
                raw: raw.to_string(),
            }),
        }
    }

    fn with_webhook_error(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            webhook_targets: Mutex::new(Vec::new()),
            webhook_result: Err(message.to_string()),
        }
    }

    fn webhook_targets(&self) -> Vec<String> {
        self.webhook_targets.lock().unwrap().clone()
    }

    fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl TelegramApi for FakeTelegram {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn set_webhook(&self, target_url: &str) -> Result<WebhookAck, BotError> {
        self.webhook_targets
            .lock()
            .unwrap()
            .push(target_url.to_string());
        match &self.webhook_result {
            Ok(ack) => Ok(ack.clone()),
            Err(message) => Err(BotError::HttpError(message.clone())),
        }
    }
}

struct FakeSearch {
    queries: Mutex<Vec<String>>,
}

impl FakeSearch {
    fn new() -> Self {
        Self {
            queries: Mutex::new(Vec::new()),
        }
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchApi for FakeSearch {
    async fn search_files(&self, query: &str) -> Result<SearchResponse, BotError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(SearchResponse {
            total_files: 1,
            files: vec![json!({"name": "file.txt"})],
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> AppConfig {
    AppConfig {
        bot_token: "test-token".to_string(),
        worker_url: Some("https://bot.example.com".to_string()),
        search_api_base: "https://search.example.com".to_string(),
        results_page_url: "https://results.example.com/search".to_string(),
    }
}

fn config_without_worker_url() -> AppConfig {
    AppConfig {
        worker_url: None,
        ..test_config()
    }
}

fn status_of(response: &Value) -> u64 {
    response
        .get("statusCode")
        .and_then(|v| v.as_u64())
        .expect("statusCode present")
}

fn body_of(response: &Value) -> &str {
    response
        .get("body")
        .and_then(|v| v.as_str())
        .expect("body present")
}

fn post_payload(body: &str) -> Value {
    json!({
        "rawPath": "/",
        "requestContext": { "http": { "method": "POST" } },
        "body": body
    })
}

// ============================================================================
// Routing
// ============================================================================

#[tokio::test]
async fn test_unknown_get_returns_static_response() {
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/status",
        "requestContext": { "http": { "method": "GET" } }
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 200);
    assert!(body_of(&response).contains("Filescout"));
    assert_eq!(telegram.sent_count(), 0);
    assert_eq!(search.query_count(), 0);
}

#[tokio::test]
async fn test_post_with_malformed_body_returns_400() {
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();

    let response = route(
        &test_config(),
        &post_payload("this is not json"),
        &telegram,
        &search,
    )
    .await;

    assert_eq!(status_of(&response), 400);
    assert_eq!(body_of(&response), "Invalid request body");
    assert_eq!(telegram.sent_count(), 0);
    assert_eq!(search.query_count(), 0);
}

#[tokio::test]
async fn test_post_with_missing_body_returns_400() {
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/",
        "requestContext": { "http": { "method": "POST" } }
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 400);
    assert_eq!(body_of(&response), "Invalid request body");
}

#[tokio::test]
async fn test_post_with_update_runs_search_flow() {
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();
    let update = json!({
        "update_id": 1,
        "message": {
            "message_id": 3,
            "chat": { "id": -500, "type": "group" },
            "text": "meeting notes"
        }
    });

    let response = route(
        &test_config(),
        &post_payload(&update.to_string()),
        &telegram,
        &search,
    )
    .await;

    assert_eq!(status_of(&response), 200);
    assert_eq!(search.query_count(), 1);
    assert_eq!(telegram.sent_count(), 1);
}

#[tokio::test]
async fn test_legacy_payload_shape_is_accepted() {
    // REST API gateway payloads carry `path` and `httpMethod` instead
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();
    let payload = json!({
        "path": "/",
        "httpMethod": "POST",
        "body": json!({ "update_id": 2 }).to_string()
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 200);
    assert_eq!(telegram.sent_count(), 0);
}

// ============================================================================
// Webhook registration
// ============================================================================

#[tokio::test]
async fn test_register_webhook_without_worker_url_returns_500() {
    let telegram = FakeTelegram::new();
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/registerWebhook",
        "requestContext": { "http": { "method": "GET" } }
    });

    let response = route(&config_without_worker_url(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 500);
    assert_eq!(body_of(&response), "WORKER_URL is not set");
    // 500 happens before any outbound call
    assert!(telegram.webhook_targets().is_empty());
}

#[tokio::test]
async fn test_register_webhook_success_embeds_raw_response() {
    let telegram = FakeTelegram::with_webhook_ack(true, r#"{"ok":true,"description":"Webhook was set"}"#);
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/registerWebhook",
        "requestContext": { "http": { "method": "GET" } }
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 200);
    let body = body_of(&response);
    assert!(body.contains("https://bot.example.com"));
    assert!(body.contains(r#"{"ok":true,"description":"Webhook was set"}"#));
    assert_eq!(
        telegram.webhook_targets(),
        vec!["https://bot.example.com".to_string()]
    );
}

#[tokio::test]
async fn test_register_webhook_rejection_returns_500_with_raw_response() {
    let telegram = FakeTelegram::with_webhook_ack(false, r#"{"ok":false,"description":"bad url"}"#);
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/registerWebhook",
        "requestContext": { "http": { "method": "GET" } }
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 500);
    assert!(body_of(&response).contains(r#"{"ok":false,"description":"bad url"}"#));
}

#[tokio::test]
async fn test_register_webhook_transport_error_returns_500() {
    let telegram = FakeTelegram::with_webhook_error("connection refused");
    let search = FakeSearch::new();
    let payload = json!({
        "rawPath": "/prod/registerWebhook",
        "requestContext": { "http": { "method": "POST" } }
    });

    let response = route(&test_config(), &payload, &telegram, &search).await;

    assert_eq!(status_of(&response), 500);
    assert!(body_of(&response).contains("connection refused"));
}
