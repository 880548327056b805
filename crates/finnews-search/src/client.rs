//! Serper news API client
//!
//! See: https://serper.dev

use crate::{Result, SearchError};
use finnews_core::NewsArticle;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SERPER_NEWS_URL: &str = "https://google.serper.dev/news";

/// Client for the Google Serper news endpoint
pub struct SerperClient {
    client: Client,
    api_key: String,
}

impl SerperClient {
    /// Create a new Serper client
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Create a client from environment variable
    ///
    /// Reads the API key from the `SERPER_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("SERPER_API_KEY").map_err(|_| {
            SearchError::ConfigurationError(
                "SERPER_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::new(api_key)
    }

    /// Fetch news articles for a query
    ///
    /// Results missing either a headline or content are skipped, so the
    /// returned articles are always analyzable.
    pub async fn search_news(&self, query: &str, num_results: usize) -> Result<Vec<NewsArticle>> {
        debug!(query, num_results, "Fetching news from Serper");

        let response = self
            .client
            .post(SERPER_NEWS_URL)
            .header("X-API-KEY", &self.api_key)
            .header("content-type", "application/json")
            .json(&SerperRequest {
                q: query.to_string(),
                num: num_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => SearchError::AuthenticationFailed,
                _ => SearchError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let body: SerperResponse = response.json().await?;
        Ok(body.news.into_iter().filter_map(into_article).collect())
    }
}

/// Fetch news articles, swallowing transport errors
///
/// Convenience wrapper that builds a client from the environment and maps
/// any failure to an empty result set with a warning, matching the
/// pipeline's never-abort posture.
pub async fn fetch_financial_news(query: &str, num_results: usize) -> Vec<NewsArticle> {
    let client = match SerperClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "News search unavailable");
            return Vec::new();
        }
    };

    match client.search_news(query, num_results).await {
        Ok(articles) => articles,
        Err(e) => {
            warn!(error = %e, "News search failed");
            Vec::new()
        }
    }
}

fn into_article(raw: SerperArticle) -> Option<NewsArticle> {
    if raw.title.is_empty() || raw.snippet.is_empty() {
        return None;
    }

    let mut article = NewsArticle::new(raw.title, raw.snippet)
        .with_article_id(uuid::Uuid::new_v4().to_string())
        .with_published_at(raw.date);
    if !raw.link.is_empty() {
        article = article.with_link(raw.link);
    }
    if !raw.source.is_empty() {
        article = article.with_source(raw.source);
    }
    Some(article)
}

// Serper wire types

#[derive(Debug, Serialize)]
struct SerperRequest {
    q: String,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    news: Vec<SerperArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SerperArticle {
    title: String,
    snippet: String,
    date: String,
    link: String,
    source: String,
}
