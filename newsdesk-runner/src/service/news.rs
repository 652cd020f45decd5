//! News lookup tool
//!
//! Exposes the news search service to the assistant as the `get_news`
//! function. Articles are rendered as labelled lines, one field per line,
//! with a blank line between articles.

use async_trait::async_trait;
use newsdesk_client::{NewsClient, NewsQuery};
use newsdesk_core::domain::news::Article;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::service::tools::{Tool, ToolError, parse_arguments};

/// Function name advertised to the assistant
pub const GET_NEWS: &str = "get_news";

/// Searches recent news articles about a topic
pub struct GetNewsTool {
    client: NewsClient,
}

#[derive(Debug, Deserialize)]
struct GetNewsArgs {
    topic: String,
}

impl GetNewsTool {
    pub fn new(client: NewsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetNewsTool {
    fn name(&self) -> &str {
        GET_NEWS
    }

    fn description(&self) -> &str {
        "Get the latest news articles about a topic"
    }

    fn parameters(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The topic for the news, e.g. bitcoin"
                }
            },
            "required": ["topic"]
        })
    }

    async fn call(&self, arguments: JsonValue) -> Result<String, ToolError> {
        let args: GetNewsArgs = parse_arguments(arguments)?;
        let topic = args.topic.trim();
        if topic.is_empty() {
            return Err(ToolError::InvalidArguments(
                "topic must not be empty".to_string(),
            ));
        }

        let articles = self
            .client
            .search(&NewsQuery::topic(topic))
            .await
            .map_err(|e| ToolError::Failed(format!("news search failed: {}", e)))?;

        info!("Found {} article(s) for {:?}", articles.len(), topic);

        Ok(format_articles(topic, &articles))
    }
}

/// Renders articles as the tool's plain-text output
pub fn format_articles(topic: &str, articles: &[Article]) -> String {
    if articles.is_empty() {
        return format!("No articles found for \"{}\".", topic);
    }

    articles
        .iter()
        .map(format_article)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_article(article: &Article) -> String {
    format!(
        "Title: {}\nAuthor: {}\nSource: {}\nDescription: {}\nURL: {}",
        article.title.as_deref().unwrap_or("unknown"),
        article.author.as_deref().unwrap_or("unknown"),
        article.source.name,
        article.description.as_deref().unwrap_or(""),
        article.url.as_deref().unwrap_or("unknown"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::*};
    use newsdesk_core::domain::news::ArticleSource;

    fn article(title: &str, author: Option<&str>) -> Article {
        Article {
            source: ArticleSource {
                id: None,
                name: "The Ledger".to_string(),
            },
            author: author.map(str::to_string),
            title: Some(title.to_string()),
            description: Some("Prices moved.".to_string()),
            url: Some("https://news.example/a".to_string()),
            content: None,
        }
    }

    fn tool_for(server: &Server) -> GetNewsTool {
        GetNewsTool::new(NewsClient::with_client(
            server.url_str(""),
            "news-key",
            reqwest::Client::new(),
        ))
    }

    #[test]
    fn test_format_separates_fields_and_articles() {
        let text = format_articles(
            "bitcoin",
            &[article("One", Some("Ann")), article("Two", None)],
        );

        assert_eq!(
            text,
            "Title: One\nAuthor: Ann\nSource: The Ledger\nDescription: Prices moved.\nURL: https://news.example/a\n\n\
             Title: Two\nAuthor: unknown\nSource: The Ledger\nDescription: Prices moved.\nURL: https://news.example/a"
        );
    }

    #[test]
    fn test_format_zero_matches() {
        assert_eq!(
            format_articles("bitcoin", &[]),
            "No articles found for \"bitcoin\"."
        );
    }

    #[tokio::test]
    async fn test_missing_topic_is_invalid_arguments() {
        let server = Server::run();
        let err = tool_for(&server)
            .call(serde_json::json!({"subject": "bitcoin"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = tool_for(&server)
            .call(serde_json::json!({"topic": "   "}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_an_empty_result() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything"))
                .respond_with(status_code(500)),
        );

        let err = tool_for(&server)
            .call(serde_json::json!({"topic": "bitcoin"}))
            .await
            .unwrap_err();

        match err {
            ToolError::Failed(message) => assert!(message.contains("status 500")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_call_renders_articles() {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("GET", "/v2/everything"),
                request::query(url_decoded(contains(("q", "bitcoin")))),
            ])
            .respond_with(json_encoded(serde_json::json!({
                "status": "ok",
                "totalResults": 1,
                "articles": [{
                    "source": {"id": null, "name": "The Ledger"},
                    "author": "Ann",
                    "title": "One",
                    "description": "Prices moved.",
                    "url": "https://news.example/a",
                    "content": "Full text"
                }]
            }))),
        );

        let text = tool_for(&server)
            .call(serde_json::json!({"topic": "bitcoin"}))
            .await
            .unwrap();

        assert!(text.starts_with("Title: One\nAuthor: Ann\n"));
        assert!(!text.contains("Full text"));
    }

    #[tokio::test]
    async fn test_call_tolerates_untitled_article() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/v2/everything")).respond_with(
                json_encoded(serde_json::json!({
                    "status": "ok",
                    "totalResults": 2,
                    "articles": [
                        {
                            "source": {"id": null, "name": "Wire"},
                            "author": null,
                            "title": null,
                            "description": null,
                            "url": null
                        },
                        {
                            "source": {"id": null, "name": "The Ledger"},
                            "author": "Ann",
                            "title": "Two",
                            "description": "Prices moved.",
                            "url": "https://news.example/b"
                        }
                    ]
                })),
            ),
        );

        let text = tool_for(&server)
            .call(serde_json::json!({"topic": "bitcoin"}))
            .await
            .unwrap();

        assert!(text.starts_with("Title: unknown\nAuthor: unknown\nSource: Wire\n"));
        assert!(text.contains("URL: unknown\n\nTitle: Two"));
    }
}
