//! API Module
//!
//! HTTP layer of the news summarizer: a topic form, the summary page and a
//! health check.

pub mod error;
pub mod health;
pub mod pages;
pub mod summarize;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use newsdesk_runner::AssistantSession;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Shared handler state
///
/// Submissions share one assistant and one thread, so requests are
/// serialized on the session lock.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<AssistantSession>>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(session: AssistantSession, shutdown: CancellationToken) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            shutdown,
        }
    }
}

/// Create the main router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Summarizer
        .route("/", get(summarize::index))
        .route("/summarize", post(summarize::summarize))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
