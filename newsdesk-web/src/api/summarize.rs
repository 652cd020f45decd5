//! Summarizer API Handlers

use axum::{Form, extract::State, response::Html};
use newsdesk_runner::RunOutcome;
use serde::Deserialize;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::pages;

#[derive(Debug, Deserialize)]
pub struct SummarizeForm {
    pub topic: String,
}

/// GET /
/// Topic form
pub async fn index() -> ApiResult<Html<String>> {
    Ok(Html(pages::index()?))
}

/// POST /summarize
/// Runs the news summarizer on the submitted topic
pub async fn summarize(
    State(state): State<AppState>,
    Form(form): Form<SummarizeForm>,
) -> ApiResult<Html<String>> {
    let topic = form.topic.trim();
    if topic.is_empty() {
        return Err(ApiError::BadRequest("Enter a topic".to_string()));
    }

    tracing::info!("Summarizing news on {:?}", topic);

    let mut session = state.session.lock().await;
    let exchange = session
        .summarize_news(topic, &state.shutdown.child_token())
        .await?;

    match exchange.outcome {
        RunOutcome::Completed(completion) => Ok(Html(pages::summary(
            topic,
            &completion,
            &exchange.steps,
        )?)),
        outcome => Err(ApiError::from_outcome(&exchange.run_id, outcome)),
    }
}
