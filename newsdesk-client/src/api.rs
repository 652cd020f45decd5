//! Assistant service abstraction
//!
//! The run poller, tool dispatcher and session depend on this trait rather
//! than on [`AssistantClient`] directly.

use async_trait::async_trait;
use newsdesk_core::domain::assistant::Assistant;
use newsdesk_core::domain::file::FileObject;
use newsdesk_core::domain::message::Message;
use newsdesk_core::domain::run::{Run, RunStep};
use newsdesk_core::domain::thread::Thread;
use newsdesk_core::dto::assistant::CreateAssistant;
use newsdesk_core::dto::message::CreateMessage;
use newsdesk_core::dto::run::{CreateRun, ToolOutput};

use crate::AssistantClient;
use crate::error::Result;

/// Operations consumed from the conversational-assistant service
#[async_trait]
pub trait AssistantApi: Send + Sync {
    async fn create_assistant(&self, req: &CreateAssistant) -> Result<Assistant>;

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;

    async fn create_thread(&self) -> Result<Thread>;

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread>;

    async fn create_message(&self, thread_id: &str, req: CreateMessage) -> Result<Message>;

    /// Newest first
    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<Message>>;

    async fn create_run(&self, thread_id: &str, req: CreateRun) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: Vec<ToolOutput>,
    ) -> Result<Run>;

    /// Asks the service to stop a run that is still queued or in progress
    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>>;

    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<FileObject>;
}

#[async_trait]
impl AssistantApi for AssistantClient {
    async fn create_assistant(&self, req: &CreateAssistant) -> Result<Assistant> {
        AssistantClient::create_assistant(self, req).await
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        AssistantClient::retrieve_assistant(self, assistant_id).await
    }

    async fn create_thread(&self) -> Result<Thread> {
        AssistantClient::create_thread(self).await
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        AssistantClient::retrieve_thread(self, thread_id).await
    }

    async fn create_message(&self, thread_id: &str, req: CreateMessage) -> Result<Message> {
        AssistantClient::create_message(self, thread_id, req).await
    }

    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<Message>> {
        AssistantClient::list_messages(self, thread_id, limit).await
    }

    async fn create_run(&self, thread_id: &str, req: CreateRun) -> Result<Run> {
        AssistantClient::create_run(self, thread_id, req).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        AssistantClient::retrieve_run(self, thread_id, run_id).await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: Vec<ToolOutput>,
    ) -> Result<Run> {
        AssistantClient::submit_tool_outputs(self, thread_id, run_id, tool_outputs).await
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        AssistantClient::cancel_run(self, thread_id, run_id).await
    }

    async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>> {
        AssistantClient::list_run_steps(self, thread_id, run_id).await
    }

    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<FileObject> {
        AssistantClient::upload_file(self, filename, bytes).await
    }
}
