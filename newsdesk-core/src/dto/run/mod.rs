//! Run DTOs

use serde::{Deserialize, Serialize};

/// Request to start a run of an assistant on a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRun {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Output produced locally for one tool call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

/// Batch of tool outputs for a run waiting on them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitToolOutputs {
    pub tool_outputs: Vec<ToolOutput>,
}
