//! Health Check API Handler
//!
//! Reports liveness and which assistant and thread the server is bound to.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use super::AppState;

/// GET /health
/// Health check endpoint
///
/// Never waits on the session lock; a summary in progress reports `busy`.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let body = match state.session.try_lock() {
        Ok(session) => json!({
            "status": "ok",
            "busy": false,
            "assistant_id": session.assistant().map(|a| a.id.clone()),
            "thread_id": session.thread().map(|t| t.id.clone()),
            "tools": session.tools().names().collect::<Vec<_>>(),
        }),
        Err(_) => json!({ "status": "ok", "busy": true }),
    };

    (StatusCode::OK, Json(body))
}
