//! Thread and message endpoints

use crate::AssistantClient;
use crate::error::Result;
use newsdesk_core::domain::ListPage;
use newsdesk_core::domain::message::Message;
use newsdesk_core::domain::thread::Thread;
use newsdesk_core::dto::message::CreateMessage;

impl AssistantClient {
    // =============================================================================
    // Threads
    // =============================================================================

    /// Create a new, empty thread
    pub async fn create_thread(&self) -> Result<Thread> {
        self.post("threads", &serde_json::json!({})).await
    }

    /// Get a thread by ID
    pub async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        self.get(&format!("threads/{}", thread_id)).await
    }

    // =============================================================================
    // Messages
    // =============================================================================

    /// Append a message to a thread
    ///
    /// # Arguments
    /// * `thread_id` - The thread to append to
    /// * `req` - Role, content and optional file attachments
    ///
    /// # Returns
    /// The stored message
    pub async fn create_message(&self, thread_id: &str, req: CreateMessage) -> Result<Message> {
        self.post(&format!("threads/{}/messages", thread_id), &req)
            .await
    }

    /// List messages of a thread, newest first
    ///
    /// # Arguments
    /// * `thread_id` - The thread to read
    /// * `limit` - Maximum number of messages to return (1-100)
    pub async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<Message>> {
        let page: ListPage<Message> = self
            .get(&format!(
                "threads/{}/messages?order=desc&limit={}",
                thread_id,
                limit.clamp(1, 100)
            ))
            .await?;

        Ok(page.data)
    }
}
