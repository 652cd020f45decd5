//! Newsdesk HTTP Clients
//!
//! Type-safe HTTP clients for the two remote services Newsdesk orchestrates:
//!
//! - [`AssistantClient`]: the conversational-assistant service (assistants,
//!   threads, messages, runs, tool outputs, files)
//! - [`NewsClient`]: the news search service
//!
//! The [`AssistantApi`] trait abstracts the assistant service so the run
//! poller and session can be driven by other implementations.
//!
//! # Example
//!
//! ```no_run
//! use newsdesk_client::AssistantClient;
//! use newsdesk_core::dto::message::CreateMessage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = AssistantClient::new("sk-...");
//!
//!     let thread = client.create_thread().await?;
//!     client
//!         .create_message(&thread.id, CreateMessage::user("How much water should I drink?"))
//!         .await?;
//!
//!     println!("Created thread: {}", thread.id);
//!     Ok(())
//! }
//! ```

mod api;
mod assistants;
pub mod error;
mod files;
pub mod news;
mod runs;
mod threads;

// Re-export commonly used types
pub use api::AssistantApi;
pub use error::{ClientError, Result};
pub use news::{NewsClient, NewsError, NewsQuery};

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

/// Default base URL of the assistant service
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const BETA_HEADER: &str = "openai-beta";
const BETA_VALUE: &str = "assistants=v2";

/// HTTP client for the assistant service
///
/// Methods are organized into logical groups:
/// - Assistant definitions (create, retrieve)
/// - Threads and messages (create, retrieve, append, list)
/// - Runs (create, retrieve, submit tool outputs, list steps)
/// - Files (upload)
#[derive(Debug, Clone)]
pub struct AssistantClient {
    /// Base URL of the service (e.g., "https://api.openai.com/v1")
    base_url: String,
    /// Bearer credential
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl AssistantClient {
    /// Create a new client against the default base URL
    ///
    /// # Arguments
    /// * `api_key` - The service credential
    ///
    /// # Example
    /// ```
    /// use newsdesk_client::AssistantClient;
    ///
    /// let client = AssistantClient::new("sk-test");
    /// assert_eq!(client.base_url(), "https://api.openai.com/v1");
    /// ```
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(DEFAULT_BASE_URL, api_key, Client::new())
    }

    /// Create a new client with a custom base URL and HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, or to
    /// point the client at a compatible gateway.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the service
    /// * `api_key` - The service credential
    /// * `client` - A configured reqwest Client
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

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Headers sent with every request
    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| ClientError::InvalidRequest("API key is not a valid header value".into()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(BETA_HEADER, HeaderValue::from_static(BETA_VALUE));
        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .headers(self.headers()?)
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn post<B: serde::Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(
                status.as_u16(),
                extract_error_message(&error_text),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Pull `error.message` out of a service error body, falling back to the raw text
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = AssistantClient::new("sk-test");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = AssistantClient::with_client("http://localhost:8080/v1/", "k", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080/v1");
        assert_eq!(client.url("/threads"), "http://localhost:8080/v1/threads");
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error":{"message":"No thread found","type":"invalid_request_error"}}"#;
        assert_eq!(extract_error_message(body), "No thread found");
        assert_eq!(extract_error_message("plain failure"), "plain failure");
    }
}
