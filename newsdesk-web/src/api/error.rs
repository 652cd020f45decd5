//! API Error Handling
//!
//! Errors and unfinished runs render as an HTML page carrying the matching
//! status code.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use newsdesk_core::domain::run::RunStatus;
use newsdesk_runner::{RunOutcome, SessionError};

use super::pages;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    RunFailed {
        run_id: String,
        status: RunStatus,
        reason: Option<String>,
    },
    TimedOut {
        run_id: String,
        waited: Duration,
    },
    Cancelled {
        run_id: String,
    },
    Session(SessionError),
    InternalError(String),
}

impl ApiError {
    /// Error for a run that ended without an answer
    pub fn from_outcome(run_id: &str, outcome: RunOutcome) -> Self {
        let run_id = run_id.to_string();
        match outcome {
            RunOutcome::Failed { status, reason } => ApiError::RunFailed {
                run_id,
                status,
                reason,
            },
            RunOutcome::TimedOut { waited } => ApiError::TimedOut { run_id, waited },
            RunOutcome::Cancelled => ApiError::Cancelled { run_id },
            RunOutcome::Completed(_) => {
                ApiError::InternalError(format!("Run {} completed unexpectedly", run_id))
            }
        }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::RunFailed {
                run_id,
                status,
                reason,
            } => (
                StatusCode::BAD_GATEWAY,
                match reason {
                    Some(reason) => format!("Run {} ended with status {}: {}", run_id, status, reason),
                    None => format!("Run {} ended with status {}", run_id, status),
                },
            ),
            ApiError::TimedOut { run_id, waited } => (
                StatusCode::GATEWAY_TIMEOUT,
                format!(
                    "Run {} did not finish within {}s",
                    run_id,
                    waited.as_secs()
                ),
            ),
            ApiError::Cancelled { run_id } => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Run {} was cancelled because the server is shutting down", run_id),
            ),
            ApiError::Session(err) => {
                let status = match err {
                    SessionError::Client(_) | SessionError::Poll(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, message);
        } else {
            tracing::warn!("Rejected request: {}", message);
        }

        match pages::error(status, &message) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                (status, message).into_response()
            }
        }
    }
}

impl From<tera::Error> for ApiError {
    fn from(err: tera::Error) -> Self {
        ApiError::InternalError(format!("Failed to render page: {}", err))
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
