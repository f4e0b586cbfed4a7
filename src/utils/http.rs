//! Process-wide HTTP client shared by the Telegram and search API clients.

use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;

static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Returns the process-wide reqwest client. Warm Lambda invocations reuse its
/// connection pool.
#[must_use]
pub fn http_client() -> &'static Client {
    &HTTP_CLIENT
}
