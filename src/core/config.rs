use std::env;

/// Default origin of the file-search API.
pub const DEFAULT_SEARCH_API_BASE: &str = "https://api.filescout.io";

/// Default web results page linked from the inline button.
pub const DEFAULT_RESULTS_PAGE_URL: &str = "https://filescout.io/search";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram bot token. Required on every route.
    pub bot_token: String,
    /// Public base URL of this deployment; only webhook registration needs it.
    pub worker_url: Option<String>,
    pub search_api_base: String,
    pub results_page_url: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a plain-text diagnostic when the bot token is absent. All other
    /// values are optional or defaulted.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bot_token: env::var("BOT_TOKEN").map_err(|_| "BOT_TOKEN secret is not set".to_string())?,
            worker_url: env::var("WORKER_URL").ok(),
            search_api_base: env::var("SEARCH_API_BASE")
                .unwrap_or_else(|_| DEFAULT_SEARCH_API_BASE.to_string()),
            results_page_url: env::var("RESULTS_PAGE_URL")
                .unwrap_or_else(|_| DEFAULT_RESULTS_PAGE_URL.to_string()),
        })
    }
}
