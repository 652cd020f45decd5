//! News command handler

use anyhow::{Result, bail};
use colored::*;
use newsdesk_runner::{AssistantSession, Config};

use super::cancel_on_ctrl_c;
use crate::output::report;

/// Summarize the news on a topic with the news summarizer assistant
///
/// Without ASSISTANT_ID a new assistant carrying the get_news function is
/// created; its id is printed so later calls can reuse it.
pub async fn summarize(config: &Config, topic: &str, show_steps: bool) -> Result<()> {
    if topic.trim().is_empty() {
        bail!("Topic cannot be empty");
    }

    let mut session = AssistantSession::from_config(config).await?;
    if session.tools().is_empty() {
        bail!("NEWS_API_KEY is not set; the news tool is unavailable");
    }

    let cancel = cancel_on_ctrl_c();
    let exchange = session.summarize_news(topic, &cancel).await?;

    if config.assistant_id.is_none()
        && let Some(assistant) = session.assistant()
    {
        eprintln!("{} Assistant {}", "▸".cyan(), assistant.id.dimmed());
    }
    if config.thread_id.is_none()
        && let Some(thread) = session.thread()
    {
        eprintln!("{} Thread {}", "▸".cyan(), thread.id.dimmed());
    }

    report(&exchange, show_steps)
}
