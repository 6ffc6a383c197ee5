//! HTTP client for the NewsAPI top-headlines endpoint.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::DataError;
use crate::parse_base_url;
use crate::types::Article;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

/// Client for NewsAPI (`/v2/top-headlines`).
///
/// Use [`NewsClient::new`] for production or [`NewsClient::with_base_url`]
/// to point at a mock server in tests. The API key is sent via the
/// `X-Api-Key` header, never in the URL.
pub struct NewsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl NewsClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, DataError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`DataError::BaseUrl`] if `base_url` is not a valid
    /// URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Top headlines matching the given topic terms.
    ///
    /// Articles the API returns without a usable title (null or blank) are
    /// dropped here; everything downstream can rely on non-empty titles.
    ///
    /// # Errors
    ///
    /// - [`DataError::Http`] on network failure or non-2xx HTTP status.
    /// - [`DataError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn top_headlines(&self, terms: &str) -> Result<Vec<Article>, DataError> {
        tracing::debug!(terms, "requesting top headlines");
        let encoded = utf8_percent_encode(terms, NON_ALPHANUMERIC).to_string();
        let url = format!("{}v2/top-headlines?q={encoded}", self.base_url);

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        let envelope: HeadlinesResponse =
            serde_json::from_str(&body).map_err(|source| DataError::Deserialize {
                context: "top_headlines".to_owned(),
                source,
            })?;

        let articles = envelope
            .articles
            .into_iter()
            .filter_map(|raw| {
                let title = raw.title?;
                if title.trim().is_empty() {
                    return None;
                }
                Some(Article {
                    title,
                    description: raw.description,
                })
            })
            .collect();

        Ok(articles)
    }
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}
