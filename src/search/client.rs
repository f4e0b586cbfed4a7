use async_trait::async_trait;

use crate::core::models::SearchResponse;
use crate::errors::BotError;
use crate::utils::http::http_client;

/// Capability for querying the file-search API.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the HTTP call fails, the API answers with a
    /// non-success status, or the body does not parse.
    async fn search_files(&self, query: &str) -> Result<SearchResponse, BotError>;
}

/// Production client for the file-search API.
pub struct SearchClient {
    base_url: String,
}

impl SearchClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SearchApi for SearchClient {
    async fn search_files(&self, query: &str) -> Result<SearchResponse, BotError> {
        let url = format!(
            "{}/files/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = http_client().get(url).send().await?;

        if !response.status().is_success() {
            return Err(BotError::SearchApi(format!(
                "search returned {}",
                response.status()
            )));
        }

        let result = response.json::<SearchResponse>().await?;
        Ok(result)
    }
}
