//! Message DTOs

use serde::{Deserialize, Serialize};

use crate::domain::assistant::ToolDefinition;
use crate::domain::message::Role;

/// Request to append a message to a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A previously uploaded file attached to a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub file_id: String,
    pub tools: Vec<ToolDefinition>,
}

impl CreateMessage {
    /// Creates a plain user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            attachments: Vec::new(),
        }
    }

    /// Attaches a file for retrieval through the file search tool
    pub fn with_file(mut self, file_id: impl Into<String>) -> Self {
        self.attachments.push(Attachment {
            file_id: file_id.into(),
            tools: vec![ToolDefinition::FileSearch],
        });
        self
    }
}
