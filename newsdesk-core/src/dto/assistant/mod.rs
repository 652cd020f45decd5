//! Assistant DTOs

use serde::{Deserialize, Serialize};

use crate::domain::assistant::ToolDefinition;

/// Request to create a new assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssistant {
    pub model: String,
    pub name: String,
    pub instructions: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}
