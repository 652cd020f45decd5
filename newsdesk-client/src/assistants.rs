//! Assistant definition endpoints

use crate::AssistantClient;
use crate::error::Result;
use newsdesk_core::domain::assistant::Assistant;
use newsdesk_core::dto::assistant::CreateAssistant;

impl AssistantClient {
    /// Create a new assistant
    ///
    /// # Arguments
    /// * `req` - Model, name, instructions and enabled tools
    ///
    /// # Returns
    /// The created assistant
    pub async fn create_assistant(&self, req: &CreateAssistant) -> Result<Assistant> {
        self.post("assistants", req).await
    }

    /// Get an assistant by ID
    pub async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        self.get(&format!("assistants/{}", assistant_id)).await
    }
}
