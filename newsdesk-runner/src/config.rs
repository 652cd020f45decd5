//! Session configuration
//!
//! Defines every configurable parameter of an assistant session: service
//! credentials and endpoints, the assistant and thread to reuse, and the
//! polling budget. Values are read once at startup and passed by value.

use std::time::Duration;

use crate::scheduler::PollPolicy;

/// Session configuration
///
/// All intervals are configurable to allow tuning for slow models or
/// rate-limited accounts.
#[derive(Debug, Clone)]
pub struct Config {
    /// Assistant service credential
    pub api_key: String,

    /// Assistant service base URL (e.g., "https://api.openai.com/v1")
    pub base_url: String,

    /// Model used when a new assistant is created
    pub model: String,

    /// Existing assistant to reuse instead of creating one
    pub assistant_id: Option<String>,

    /// Existing thread to reuse instead of creating one
    pub thread_id: Option<String>,

    /// News search credential; the news tool is disabled without it
    pub news_api_key: Option<String>,

    /// News search base URL
    pub news_url: String,

    /// How long to sleep between run status polls
    pub poll_interval: Duration,

    /// Maximum time to wait for a single run
    pub max_wait: Duration,

    /// Consecutive transient failures tolerated while polling
    pub max_retries: u32,

    /// Upper bound on any single HTTP request
    pub request_timeout: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: newsdesk_client::DEFAULT_BASE_URL.to_string(),
            model: "gpt-4o-mini".to_string(),
            assistant_id: None,
            thread_id: None,
            news_api_key: None,
            news_url: newsdesk_client::news::DEFAULT_NEWS_URL.to_string(),
            poll_interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600), // 10 minutes
            max_retries: 3,
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Loads `.env` (if present) and then the process environment
    pub fn load() -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv()
            && !e.not_found()
        {
            return Err(anyhow::anyhow!("Failed to read .env file: {}", e));
        }

        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_MODEL (optional, default: gpt-4o-mini)
    /// - OPENAI_BASE_URL (optional, default: https://api.openai.com/v1)
    /// - ASSISTANT_ID (optional)
    /// - THREAD_ID (optional)
    /// - NEWS_API_KEY (optional, enables the get_news tool)
    /// - NEWS_API_URL (optional, default: https://newsapi.org)
    /// - POLL_INTERVAL (optional, seconds, default: 5)
    /// - MAX_WAIT (optional, seconds, default: 600)
    /// - MAX_RETRIES (optional, default: 3)
    /// - REQUEST_TIMEOUT (optional, seconds, default: 60)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("OPENAI_API_KEY")
            .ok_or_else(|| anyhow::anyhow!("OPENAI_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);

        if let Some(model) = non_empty("OPENAI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = non_empty("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(news_url) = non_empty("NEWS_API_URL") {
            config.news_url = news_url;
        }

        config.assistant_id = non_empty("ASSISTANT_ID");
        config.thread_id = non_empty("THREAD_ID");
        config.news_api_key = non_empty("NEWS_API_KEY");

        config.poll_interval = non_empty("POLL_INTERVAL")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.poll_interval);

        config.max_wait = non_empty("MAX_WAIT")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.max_wait);

        config.max_retries = non_empty("MAX_RETRIES")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(config.max_retries);

        config.request_timeout = non_empty("REQUEST_TIMEOUT")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.request_timeout);

        Ok(config)
    }

    /// Reuses an existing assistant
    pub fn with_assistant(mut self, assistant_id: impl Into<String>) -> Self {
        self.assistant_id = Some(assistant_id.into());
        self
    }

    /// Reuses an existing thread
    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Polling behaviour derived from this configuration
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval,
            max_wait: self.max_wait,
            max_retries: self.max_retries,
            ..PollPolicy::default()
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        for (name, url) in [("base_url", &self.base_url), ("news_url", &self.news_url)] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.model.trim().is_empty() {
            anyhow::bail!("model cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_wait.is_zero() {
            anyhow::bail!("max_wait must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}
