//! Common helper functions for API handlers.
//!
//! Response builders producing the Lambda proxy-integration JSON shape.

use serde_json::{Value, json};

/// Returns a 200 OK acknowledgment. Telegram only checks the status code, so
/// the body is a bare "OK".
#[must_use]
pub fn ok_ack() -> Value {
    text_response(200, "OK")
}

/// Returns a plain-text response with the given status code.
#[must_use]
pub fn text_response(status_code: u16, body: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "text/plain" },
        "body": body
    })
}

/// Extracts the request path from a function-URL or API-gateway payload.
#[must_use]
pub fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(|v| v.as_str())
        .or_else(|| payload.get("path").and_then(|v| v.as_str()))
}

/// Extracts the HTTP method, defaulting to GET when the payload omits it.
#[must_use]
pub fn request_method(payload: &Value) -> &str {
    payload
        .get("requestContext")
        .and_then(|c| c.get("http"))
        .and_then(|h| h.get("method"))
        .and_then(|v| v.as_str())
        .or_else(|| payload.get("httpMethod").and_then(|v| v.as_str()))
        .unwrap_or("GET")
}
