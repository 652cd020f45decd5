//! Scripted in-memory assistant service for tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use newsdesk_client::{AssistantApi, ClientError, Result};
use newsdesk_core::domain::assistant::Assistant;
use newsdesk_core::domain::file::FileObject;
use newsdesk_core::domain::message::{ContentBlock, Message, Role, TextContent};
use newsdesk_core::domain::run::{
    RequiredAction, Run, RunStatus, RunStep, SubmitToolOutputsAction, ToolCall,
};
use newsdesk_core::domain::thread::Thread;
use newsdesk_core::dto::assistant::CreateAssistant;
use newsdesk_core::dto::message::CreateMessage;
use newsdesk_core::dto::run::{CreateRun, ToolOutput};

fn created_at() -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

pub(crate) fn run_with_status(status: RunStatus) -> Run {
    Run {
        id: "run_1".to_string(),
        thread_id: "thread_1".to_string(),
        assistant_id: "asst_1".to_string(),
        status,
        created_at: created_at(),
        completed_at: None,
        failed_at: None,
        cancelled_at: None,
        last_error: None,
        required_action: None,
        instructions: None,
    }
}

pub(crate) fn run_requiring(calls: Vec<ToolCall>) -> Run {
    let mut run = run_with_status(RunStatus::RequiresAction);
    run.required_action = Some(RequiredAction::SubmitToolOutputs {
        submit_tool_outputs: SubmitToolOutputsAction { tool_calls: calls },
    });
    run
}

pub(crate) fn completed_run(elapsed_secs: i64) -> Run {
    let mut run = run_with_status(RunStatus::Completed);
    run.completed_at = Some(created_at() + chrono::TimeDelta::seconds(elapsed_secs));
    run
}

/// Replays scripted run snapshots and records everything sent to it
///
/// Once the script is exhausted every status fetch answers `in_progress`.
pub(crate) struct ScriptedApi {
    runs: Mutex<VecDeque<Result<Run>>>,
    reply: Option<String>,
    retrieve_calls: AtomicUsize,
    list_message_calls: AtomicUsize,
    submissions: Mutex<Vec<(String, Vec<ToolOutput>)>>,
    messages: Mutex<Vec<CreateMessage>>,
    created_runs: Mutex<Vec<CreateRun>>,
    created_assistants: Mutex<Vec<CreateAssistant>>,
    uploads: Mutex<Vec<(String, usize)>>,
    cancelled_runs: Mutex<Vec<String>>,
    stall_status: bool,
    fail_submits: bool,
    fail_steps: bool,
}

impl ScriptedApi {
    pub(crate) fn new(runs: Vec<Result<Run>>) -> Self {
        Self {
            runs: Mutex::new(runs.into()),
            reply: Some("scripted reply".to_string()),
            retrieve_calls: AtomicUsize::new(0),
            list_message_calls: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            messages: Mutex::new(Vec::new()),
            created_runs: Mutex::new(Vec::new()),
            created_assistants: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
            cancelled_runs: Mutex::new(Vec::new()),
            stall_status: false,
            fail_submits: false,
            fail_steps: false,
        }
    }

    /// Status fetches never return
    pub(crate) fn stalling_status(mut self) -> Self {
        self.stall_status = true;
        self
    }

    /// Every tool output submission is answered with 503
    pub(crate) fn failing_submits(mut self) -> Self {
        self.fail_submits = true;
        self
    }

    /// Listing run steps is answered with 500
    pub(crate) fn failing_steps(mut self) -> Self {
        self.fail_steps = true;
        self
    }

    pub(crate) fn cancelled_runs(&self) -> Vec<String> {
        self.cancelled_runs.lock().unwrap().clone()
    }

    pub(crate) fn with_reply(mut self, reply: &str) -> Self {
        self.reply = Some(reply.to_string());
        self
    }

    pub(crate) fn without_reply(mut self) -> Self {
        self.reply = None;
        self
    }

    pub(crate) fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn list_message_calls(&self) -> usize {
        self.list_message_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn submissions(&self) -> Vec<(String, Vec<ToolOutput>)> {
        self.submissions.lock().unwrap().clone()
    }

    pub(crate) fn messages(&self) -> Vec<CreateMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn created_runs(&self) -> Vec<CreateRun> {
        self.created_runs.lock().unwrap().clone()
    }

    pub(crate) fn created_assistants(&self) -> Vec<CreateAssistant> {
        self.created_assistants.lock().unwrap().clone()
    }

    pub(crate) fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl AssistantApi for ScriptedApi {
    async fn create_assistant(&self, req: &CreateAssistant) -> Result<Assistant> {
        self.created_assistants.lock().unwrap().push(req.clone());
        Ok(Assistant {
            id: "asst_new".to_string(),
            created_at: created_at(),
            name: Some(req.name.clone()),
            model: req.model.clone(),
            instructions: Some(req.instructions.clone()),
            tools: req.tools.clone(),
        })
    }

    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant> {
        Ok(Assistant {
            id: assistant_id.to_string(),
            created_at: created_at(),
            name: None,
            model: "gpt-4o-mini".to_string(),
            instructions: None,
            tools: Vec::new(),
        })
    }

    async fn create_thread(&self) -> Result<Thread> {
        Ok(Thread {
            id: "thread_1".to_string(),
            created_at: created_at(),
            metadata: Default::default(),
        })
    }

    async fn retrieve_thread(&self, thread_id: &str) -> Result<Thread> {
        if thread_id == "missing" {
            return Err(ClientError::api_error(404, "No thread found"));
        }
        Ok(Thread {
            id: thread_id.to_string(),
            created_at: created_at(),
            metadata: Default::default(),
        })
    }

    async fn create_message(&self, thread_id: &str, req: CreateMessage) -> Result<Message> {
        let message = Message {
            id: format!("msg_{}", self.messages.lock().unwrap().len() + 1),
            thread_id: thread_id.to_string(),
            role: req.role,
            created_at: created_at(),
            content: vec![ContentBlock::Text {
                text: TextContent {
                    value: req.content.clone(),
                    annotations: Vec::new(),
                },
            }],
            run_id: None,
        };
        self.messages.lock().unwrap().push(req);
        Ok(message)
    }

    async fn list_messages(&self, thread_id: &str, _limit: u32) -> Result<Vec<Message>> {
        self.list_message_calls.fetch_add(1, Ordering::SeqCst);
        let content = match &self.reply {
            Some(reply) => vec![ContentBlock::Text {
                text: TextContent {
                    value: reply.clone(),
                    annotations: Vec::new(),
                },
            }],
            None => vec![ContentBlock::Unsupported],
        };
        Ok(vec![Message {
            id: "msg_reply".to_string(),
            thread_id: thread_id.to_string(),
            role: Role::Assistant,
            created_at: created_at(),
            content,
            run_id: Some("run_1".to_string()),
        }])
    }

    async fn create_run(&self, _thread_id: &str, req: CreateRun) -> Result<Run> {
        self.created_runs.lock().unwrap().push(req);
        Ok(run_with_status(RunStatus::Queued))
    }

    async fn retrieve_run(&self, _thread_id: &str, _run_id: &str) -> Result<Run> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_status {
            std::future::pending::<()>().await;
        }
        self.runs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(run_with_status(RunStatus::InProgress)))
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        run_id: &str,
        tool_outputs: Vec<ToolOutput>,
    ) -> Result<Run> {
        self.submissions
            .lock()
            .unwrap()
            .push((run_id.to_string(), tool_outputs));
        if self.fail_submits {
            return Err(ClientError::api_error(503, "service unavailable"));
        }
        Ok(run_with_status(RunStatus::Queued))
    }

    async fn cancel_run(&self, _thread_id: &str, run_id: &str) -> Result<Run> {
        self.cancelled_runs.lock().unwrap().push(run_id.to_string());
        Ok(run_with_status(RunStatus::Cancelling))
    }

    async fn list_run_steps(&self, _thread_id: &str, run_id: &str) -> Result<Vec<RunStep>> {
        if self.fail_steps {
            return Err(ClientError::api_error(500, "steps unavailable"));
        }
        Ok(vec![RunStep {
            id: "step_1".to_string(),
            run_id: run_id.to_string(),
            kind: "message_creation".to_string(),
            status: "completed".to_string(),
            created_at: created_at(),
            step_details: serde_json::json!({"type": "message_creation"}),
        }])
    }

    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<FileObject> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        Ok(FileObject {
            id: "file_1".to_string(),
            filename: filename.to_string(),
            purpose: "assistants".to_string(),
            bytes: bytes.len() as u64,
        })
    }
}
