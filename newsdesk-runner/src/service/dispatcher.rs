//! Tool dispatcher
//!
//! Answers the tool calls of a run that requires action: each call is
//! resolved against the registry, executed, and turned into exactly one
//! output. A failing call yields an `error: ...` output for its own id and
//! never prevents the other calls of the batch from running.

use newsdesk_client::{AssistantApi, ClientError};
use newsdesk_core::domain::run::ToolCall;
use newsdesk_core::dto::run::ToolOutput;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::service::tools::{ToolError, ToolRegistry};

/// Executes tool calls against a registry and reports their outputs
#[derive(Debug, Clone, Default)]
pub struct ToolDispatcher {
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Produces one output per call, in call order
    pub async fn resolve(&self, calls: &[ToolCall]) -> Vec<ToolOutput> {
        let mut outputs = Vec::with_capacity(calls.len());

        for call in calls {
            let output = match self.execute(call).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        "Tool call {} ({}) failed: {}",
                        call.id, call.function.name, e
                    );
                    format!("error: {}", e)
                }
            };

            outputs.push(ToolOutput {
                tool_call_id: call.id.clone(),
                output,
            });
        }

        outputs
    }

    /// Resolves all pending calls and submits their outputs in one batch
    ///
    /// The caller must only invoke this while the run's observed status is
    /// `requires_action`.
    ///
    /// # Returns
    /// The number of outputs submitted
    pub async fn dispatch(
        &self,
        api: &dyn AssistantApi,
        thread_id: &str,
        run_id: &str,
        calls: &[ToolCall],
    ) -> Result<usize, ClientError> {
        let outputs = self.resolve(calls).await;
        self.submit(api, thread_id, run_id, outputs).await
    }

    /// Submits already resolved outputs in one batch
    pub async fn submit(
        &self,
        api: &dyn AssistantApi,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<usize, ClientError> {
        let submitted = outputs.len();

        info!(
            "Submitting {} tool output(s) for run {}",
            submitted, run_id
        );
        api.submit_tool_outputs(thread_id, run_id, outputs).await?;

        Ok(submitted)
    }

    async fn execute(&self, call: &ToolCall) -> Result<String, ToolError> {
        let name = &call.function.name;
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.clone()))?;

        let arguments = decode_arguments(&call.function.arguments)?;

        debug!("Executing tool {} for call {}", name, call.id);
        tool.call(arguments).await
    }
}

/// Decodes the JSON-encoded arguments of a call; blank means no arguments
fn decode_arguments(raw: &str) -> Result<JsonValue, ToolError> {
    if raw.trim().is_empty() {
        return Ok(JsonValue::Object(Default::default()));
    }

    let value: JsonValue = serde_json::from_str(raw)
        .map_err(|e| ToolError::InvalidArguments(format!("arguments are not valid JSON: {}", e)))?;

    if !value.is_object() {
        return Err(ToolError::InvalidArguments(
            "arguments must be a JSON object".to_string(),
        ));
    }

    Ok(value)
}
