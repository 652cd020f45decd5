//! Message domain types

use serde::{Deserialize, Serialize};

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// An append-only record in a thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub thread_id: String,
    pub role: Role,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub run_id: Option<String>,
}

/// One block of message content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: TextContent },
    ImageFile { image_file: serde_json::Value },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub value: String,
    #[serde(default)]
    pub annotations: Vec<serde_json::Value>,
}

impl Message {
    /// Value of the first text-bearing content block, if any
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.value.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_text_skips_non_text_blocks() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "thread_id": "thread_1",
            "role": "assistant",
            "created_at": 1_700_000_000,
            "content": [
                {"type": "image_file", "image_file": {"file_id": "file_1"}},
                {"type": "text", "text": {"value": "hello", "annotations": []}},
                {"type": "text", "text": {"value": "second", "annotations": []}}
            ]
        }))
        .unwrap();

        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.first_text(), Some("hello"));
    }

    #[test]
    fn test_unknown_block_type_is_tolerated() {
        let message: Message = serde_json::from_value(serde_json::json!({
            "id": "msg_1",
            "thread_id": "thread_1",
            "role": "user",
            "created_at": 1_700_000_000,
            "content": [{"type": "refusal", "refusal": "no"}]
        }))
        .unwrap();

        assert_eq!(message.first_text(), None);
    }
}
