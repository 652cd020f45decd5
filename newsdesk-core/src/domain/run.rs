//! Run domain types
//!
//! A run is one asynchronous invocation of an assistant against a thread.
//! Its status only ever changes remotely; the client observes snapshots.

use serde::{Deserialize, Serialize};

/// Snapshot of a run as returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub failed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub cancelled_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub last_error: Option<RunError>,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Run status vocabulary of the assistant service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// No further transition happens from a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed
                | RunStatus::Failed
                | RunStatus::Cancelled
                | RunStatus::Incomplete
                | RunStatus::Expired
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::RequiresAction => "requires_action",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Failed => "failed",
            RunStatus::Completed => "completed",
            RunStatus::Incomplete => "incomplete",
            RunStatus::Expired => "expired",
            RunStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Error reported by the service for a failed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunError {
    pub code: String,
    pub message: String,
}

/// Action the client must take before the run can continue
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RequiredAction {
    SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputsAction,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitToolOutputsAction {
    pub tool_calls: Vec<ToolCall>,
}

/// A request from the assistant to execute a local function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub kind: String,
    pub function: FunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

/// Function name plus its JSON-encoded arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    /// Creates a function tool call
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: function_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

impl Run {
    /// Whether the service has stamped a completion time on this run
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some() || self.status == RunStatus::Completed
    }

    /// Pending tool calls, present only while the run requires action
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        match (&self.status, &self.required_action) {
            (
                RunStatus::RequiresAction,
                Some(RequiredAction::SubmitToolOutputs {
                    submit_tool_outputs,
                }),
            ) => &submit_tool_outputs.tool_calls,
            _ => &[],
        }
    }

    /// Time between creation and completion, if completed
    pub fn elapsed(&self) -> Option<chrono::TimeDelta> {
        self.completed_at.map(|done| done - self.created_at)
    }
}

/// One step of a run's execution trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStep {
    pub id: String,
    pub run_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub step_details: serde_json::Value,
}
