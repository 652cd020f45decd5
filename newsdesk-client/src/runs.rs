//! Run endpoints

use crate::AssistantClient;
use crate::error::Result;
use newsdesk_core::domain::ListPage;
use newsdesk_core::domain::run::{Run, RunStep};
use newsdesk_core::dto::run::{CreateRun, SubmitToolOutputs, ToolOutput};

impl AssistantClient {
    /// Start a run of an assistant on a thread
    ///
    /// # Arguments
    /// * `thread_id` - The thread to run against
    /// * `req` - Assistant ID and optional extra instructions
    ///
    /// # Returns
    /// The initial run snapshot (usually queued)
    pub async fn create_run(&self, thread_id: &str, req: CreateRun) -> Result<Run> {
        self.post(&format!("threads/{}/runs", thread_id), &req).await
    }

    /// Get the current snapshot of a run
    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get(&format!("threads/{}/runs/{}", thread_id, run_id))
            .await
    }

    /// Submit the outputs of all pending tool calls in one batch
    ///
    /// The run must currently be in the `requires_action` status.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: Vec<ToolOutput>,
    ) -> Result<Run> {
        self.post(
            &format!("threads/{}/runs/{}/submit_tool_outputs", thread_id, run_id),
            &SubmitToolOutputs { tool_outputs },
        )
        .await
    }

    /// List the execution steps of a run
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.post(
            &format!("threads/{}/runs/{}/cancel", thread_id, run_id),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn list_run_steps(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunStep>> {
        let page: ListPage<RunStep> = self
            .get(&format!("threads/{}/runs/{}/steps", thread_id, run_id))
            .await?;

        Ok(page.data)
    }
}
