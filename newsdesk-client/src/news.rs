//! News search client
//!
//! Keyword search against a NewsAPI-compatible `/v2/everything` endpoint.
//! Upstream failures are reported as [`NewsError::Upstream`] so callers can
//! tell them apart from a search that matched nothing.

use newsdesk_core::domain::news::{Article, NewsSearch};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

/// Default base URL of the news search service
pub const DEFAULT_NEWS_URL: &str = "https://newsapi.org";

/// Errors that can occur when searching news
#[derive(Debug, Error)]
pub enum NewsError {
    /// HTTP request failed before a response arrived
    #[error("News request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("News service error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse news response: {0}")]
    ParseError(String),
}

/// Parameters of a keyword search
#[derive(Debug, Clone)]
pub struct NewsQuery {
    pub topic: String,
    pub page_size: u32,
    pub language: String,
}

impl NewsQuery {
    /// Top five English articles for a topic
    pub fn topic(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            page_size: 5,
            language: "en".to_string(),
        }
    }
}

/// HTTP client for the news search service
#[derive(Debug, Clone)]
pub struct NewsClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl NewsClient {
    /// Create a new news client against the default base URL
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_NEWS_URL, api_key, Client::new())
    }

    /// Create a new news client with a custom base URL and HTTP client
    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Get the base URL of the news service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search articles matching a keyword
    ///
    /// # Returns
    /// The matching articles; an empty list means nothing matched
    pub async fn search(&self, query: &NewsQuery) -> Result<Vec<Article>, NewsError> {
        let url = format!("{}/v2/everything", self.base_url);
        let page_size = query.page_size.to_string();

        debug!("Searching news for {:?}", query.topic);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.topic.as_str()),
                ("apiKey", self.api_key.as_str()),
                ("pageSize", page_size.as_str()),
                ("language", query.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("News search returned status {}", status);
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: NewsSearch = response
            .json()
            .await
            .map_err(|e| NewsError::ParseError(e.to_string()))?;

        if !body.is_ok() {
            return Err(NewsError::Upstream {
                status: status.as_u16(),
                message: body
                    .message
                    .or(body.code)
                    .unwrap_or_else(|| format!("status {}", body.status)),
            });
        }

        debug!(
            "News search matched {} article(s), returning {}",
            body.total_results,
            body.articles.len()
        );

        Ok(body.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::*};

    fn article(n: u32) -> serde_json::Value {
        serde_json::json!({
            "source": {"id": null, "name": format!("Source {n}")},
            "author": format!("Author {n}"),
            "title": format!("Title {n}"),
            "description": format!("Description {n}"),
            "url": format!("https://news.example/{n}"),
            "content": "..."
        })
    }

    fn client_for(server: &Server) -> NewsClient {
        NewsClient::with_client(server.url_str(""), "news-key", Client::new())
    }

    #[tokio::test]
    async fn test_search_sends_query_parameters() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v2/everything"),
                request::query(url_decoded(contains(("q", "bitcoin")))),
                request::query(url_decoded(contains(("apiKey", "news-key")))),
                request::query(url_decoded(contains(("pageSize", "5")))),
                request::query(url_decoded(contains(("language", "en")))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "status": "ok",
                "totalResults": 1234,
                "articles": [article(1), article(2), article(3), article(4), article(5)]
            }))),
        );

        let articles = client_for(&server)
            .search(&NewsQuery::topic("bitcoin"))
            .await
            .unwrap();
        assert_eq!(articles.len(), 5);
        assert_eq!(articles[0].source.name, "Source 1");
    }

    #[tokio::test]
    async fn test_null_title_and_url_deserialize() {
        let server = Server::run();
        let mut untitled = article(2);
        untitled["title"] = serde_json::Value::Null;
        untitled["url"] = serde_json::Value::Null;
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything")).respond_with(
                json_encoded(serde_json::json!({
                    "status": "ok",
                    "totalResults": 2,
                    "articles": [article(1), untitled]
                })),
            ),
        );

        let articles = client_for(&server)
            .search(&NewsQuery::topic("bitcoin"))
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Title 1"));
        assert!(articles[1].title.is_none());
        assert!(articles[1].url.is_none());
    }

    #[tokio::test]
    async fn test_zero_matches_is_ok_and_empty() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything")).respond_with(
                json_encoded(serde_json::json!({
                    "status": "ok",
                    "totalResults": 0,
                    "articles": []
                })),
            ),
        );

        let articles = client_for(&server)
            .search(&NewsQuery::topic("nothing-matches-this"))
            .await
            .unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_upstream_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything"))
                .respond_with(status_code(500).body("internal")),
        );

        let err = client_for(&server)
            .search(&NewsQuery::topic("bitcoin"))
            .await
            .unwrap_err();
        assert!(matches!(err, NewsError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_error_status_in_body_is_upstream_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything")).respond_with(
                json_encoded(serde_json::json!({
                    "status": "error",
                    "code": "apiKeyInvalid",
                    "message": "Your API key is invalid"
                })),
            ),
        );

        let err = client_for(&server)
            .search(&NewsQuery::topic("bitcoin"))
            .await
            .unwrap_err();
        match err {
            NewsError::Upstream { message, .. } => assert_eq!(message, "Your API key is invalid"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
