//! Assistant session
//!
//! A session binds one assistant and one thread together with the run
//! poller and tool dispatcher. Identifiers come from [`Config`] at
//! construction; nothing is shared through process-wide state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use newsdesk_client::{AssistantApi, AssistantClient, ClientError, NewsClient};
use newsdesk_core::domain::assistant::{Assistant, ToolDefinition};
use newsdesk_core::domain::file::FileObject;
use newsdesk_core::domain::message::Message;
use newsdesk_core::domain::run::{Run, RunStep};
use newsdesk_core::domain::thread::Thread;
use newsdesk_core::dto::assistant::CreateAssistant;
use newsdesk_core::dto::message::CreateMessage;
use newsdesk_core::dto::run::CreateRun;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::scheduler::{PollError, RunOutcome, RunPoller};
use crate::service::{GetNewsTool, RegistryError, ToolDispatcher, ToolRegistry};

/// Name of the assistant created for news summaries
pub const NEWS_ASSISTANT_NAME: &str = "News Summarizer";

/// Standing instructions of the news summarizer assistant
pub const NEWS_ASSISTANT_INSTRUCTIONS: &str = "You are a personal article summarizer assistant \
    who knows how to take a list of article titles and descriptions and then write a short \
    summary of all the news articles.";

/// Errors raised by session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No thread: create or configure a thread first")]
    NoThread,

    #[error("No assistant: create or configure an assistant first")]
    NoAssistant,

    #[error("Assistant {0} already exists")]
    AssistantExists(String),

    #[error("Thread {0} already exists")]
    ThreadExists(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Poll(#[from] PollError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of one message -> run -> wait round trip
#[derive(Debug, Clone)]
pub struct Exchange {
    pub run_id: String,
    pub outcome: RunOutcome,
    /// Raw execution trace of the run; empty when it could not be listed
    pub steps: Vec<RunStep>,
}

/// A question for the assistant, optionally grounded in a document
#[derive(Debug, Clone, Default)]
pub struct Ask {
    pub question: String,
    /// Document uploaded and attached for file search
    pub file: Option<PathBuf>,
    /// Extra instructions for this run only
    pub instructions: Option<String>,
}

/// One assistant and one thread, plus the machinery to run them
pub struct AssistantSession {
    api: Arc<dyn AssistantApi>,
    dispatcher: Arc<ToolDispatcher>,
    poller: RunPoller,
    model: String,
    assistant: Option<Assistant>,
    thread: Option<Thread>,
}

impl AssistantSession {
    /// Creates a session without contacting the service
    pub fn new(config: &Config, api: Arc<dyn AssistantApi>, registry: ToolRegistry) -> Self {
        let dispatcher = Arc::new(ToolDispatcher::new(registry));
        let poller = RunPoller::new(api.clone(), dispatcher.clone(), config.poll_policy());

        Self {
            api,
            dispatcher,
            poller,
            model: config.model.clone(),
            assistant: None,
            thread: None,
        }
    }

    /// Creates a session and loads the configured assistant and thread
    pub async fn connect(
        config: &Config,
        api: Arc<dyn AssistantApi>,
        registry: ToolRegistry,
    ) -> Result<Self, SessionError> {
        let mut session = Self::new(config, api, registry);

        if let Some(assistant_id) = &config.assistant_id {
            let assistant = session.api.retrieve_assistant(assistant_id).await?;
            info!("Using assistant {}", assistant.id);
            session.assistant = Some(assistant);
        }

        if let Some(thread_id) = &config.thread_id {
            let thread = session.api.retrieve_thread(thread_id).await?;
            info!("Using thread {}", thread.id);
            session.thread = Some(thread);
        }

        Ok(session)
    }

    /// Builds the HTTP clients and tools described by the configuration
    pub async fn from_config(config: &Config) -> Result<Self, SessionError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ClientError::from)?;
        let api: Arc<dyn AssistantApi> = Arc::new(AssistantClient::with_client(
            &config.base_url,
            &config.api_key,
            http.clone(),
        ));

        let mut registry = ToolRegistry::new();
        if let Some(news_key) = &config.news_api_key {
            registry.register(GetNewsTool::new(NewsClient::with_client(
                &config.news_url,
                news_key,
                http,
            )))?;
        } else {
            info!("NEWS_API_KEY not set, news tool disabled");
        }

        Self::connect(config, api, registry).await
    }

    pub fn assistant(&self) -> Option<&Assistant> {
        self.assistant.as_ref()
    }

    pub fn thread(&self) -> Option<&Thread> {
        self.thread.as_ref()
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.dispatcher.registry()
    }

    fn thread_id(&self) -> Result<&str, SessionError> {
        self.thread
            .as_ref()
            .map(|t| t.id.as_str())
            .ok_or(SessionError::NoThread)
    }

    fn assistant_id(&self) -> Result<&str, SessionError> {
        self.assistant
            .as_ref()
            .map(|a| a.id.as_str())
            .ok_or(SessionError::NoAssistant)
    }

    // =============================================================================
    // Assistant and Thread
    // =============================================================================

    /// Creates the session's assistant
    ///
    /// Fails with [`SessionError::AssistantExists`] if the session already
    /// has one; a session never owns two assistants.
    pub async fn create_assistant(
        &mut self,
        name: &str,
        instructions: &str,
        tools: Vec<ToolDefinition>,
    ) -> Result<&Assistant, SessionError> {
        if let Some(existing) = &self.assistant {
            error!("Assistant with ID {} already exists", existing.id);
            return Err(SessionError::AssistantExists(existing.id.clone()));
        }

        let assistant = self
            .api
            .create_assistant(&CreateAssistant {
                model: self.model.clone(),
                name: name.to_string(),
                instructions: instructions.to_string(),
                tools,
            })
            .await?;

        info!("Assistant created with ID: {}", assistant.id);
        Ok(&*self.assistant.insert(assistant))
    }

    /// Returns the session's assistant, creating one with every registered tool if needed
    pub async fn ensure_assistant(
        &mut self,
        name: &str,
        instructions: &str,
    ) -> Result<&Assistant, SessionError> {
        if self.assistant.is_none() {
            let tools = self.tools().definitions();
            self.create_assistant(name, instructions, tools).await?;
        }
        self.assistant.as_ref().ok_or(SessionError::NoAssistant)
    }

    /// Creates the session's thread
    pub async fn create_thread(&mut self) -> Result<&Thread, SessionError> {
        if let Some(existing) = &self.thread {
            error!("Thread with ID {} already exists", existing.id);
            return Err(SessionError::ThreadExists(existing.id.clone()));
        }

        let thread = self.api.create_thread().await?;
        info!("Thread created with ID: {}", thread.id);
        Ok(&*self.thread.insert(thread))
    }

    /// Returns the session's thread, creating one if needed
    pub async fn ensure_thread(&mut self) -> Result<&Thread, SessionError> {
        if self.thread.is_none() {
            self.create_thread().await?;
        }
        self.thread.as_ref().ok_or(SessionError::NoThread)
    }

    // =============================================================================
    // Messages and Runs
    // =============================================================================

    /// Appends a message to the session's thread
    pub async fn add_message(&self, message: CreateMessage) -> Result<Message, SessionError> {
        let thread_id = self.thread_id()?;
        let message = self.api.create_message(thread_id, message).await?;
        info!("Message added to thread with ID: {}", thread_id);
        Ok(message)
    }

    /// Starts a run of the session's assistant on its thread
    pub async fn start_run(&self, instructions: Option<&str>) -> Result<Run, SessionError> {
        let thread_id = self.thread_id()?;
        let assistant_id = self.assistant_id()?;

        let run = self
            .api
            .create_run(
                thread_id,
                CreateRun {
                    assistant_id: assistant_id.to_string(),
                    instructions: instructions.map(str::to_string),
                },
            )
            .await?;

        info!("Run {} started for assistant {}", run.id, assistant_id);
        Ok(run)
    }

    /// Waits for a run, answering its tool calls
    pub async fn wait_for_completion(
        &self,
        run: &Run,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, SessionError> {
        Ok(self.poller.wait(&run.thread_id, &run.id, cancel).await?)
    }

    /// Current snapshot of a run on the session's thread
    pub async fn retrieve_run(&self, run_id: &str) -> Result<Run, SessionError> {
        let thread_id = self.thread_id()?;
        Ok(self.api.retrieve_run(thread_id, run_id).await?)
    }

    /// Execution trace of a run on the session's thread
    pub async fn run_steps(&self, run_id: &str) -> Result<Vec<RunStep>, SessionError> {
        let thread_id = self.thread_id()?;
        Ok(self.api.list_run_steps(thread_id, run_id).await?)
    }

    /// Uploads a document for retrieval
    pub async fn upload_file(&self, path: &Path) -> Result<FileObject, SessionError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SessionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let file = self.api.upload_file(&filename, bytes).await?;
        info!("Uploaded {} as file {}", path.display(), file.id);
        Ok(file)
    }

    // =============================================================================
    // Flows
    // =============================================================================

    /// Posts a message, runs the assistant and waits for its answer
    ///
    /// The session must already have an assistant; a thread is created if
    /// none is configured.
    pub async fn ask(
        &mut self,
        ask: Ask,
        cancel: &CancellationToken,
    ) -> Result<Exchange, SessionError> {
        self.assistant_id()?;
        self.ensure_thread().await?;

        let mut message = CreateMessage::user(ask.question);
        if let Some(path) = &ask.file {
            let file = self.upload_file(path).await?;
            message = message.with_file(file.id);
        }

        self.add_message(message).await?;
        self.exchange(ask.instructions.as_deref(), cancel).await
    }

    /// Asks the news summarizer assistant to summarize news about a topic
    pub async fn summarize_news(
        &mut self,
        topic: &str,
        cancel: &CancellationToken,
    ) -> Result<Exchange, SessionError> {
        self.ensure_thread().await?;
        self.ensure_assistant(NEWS_ASSISTANT_NAME, NEWS_ASSISTANT_INSTRUCTIONS)
            .await?;

        self.add_message(CreateMessage::user(format!(
            "Summarize the news on this topic: {}",
            topic
        )))
        .await?;

        self.exchange(Some("Summarize the news"), cancel).await
    }

    /// Step trace of a finished wait; failures only cost the trace
    async fn trace(&self, run_id: &str, cancel: &CancellationToken) -> Vec<RunStep> {
        if cancel.is_cancelled() {
            return Vec::new();
        }

        tokio::select! {
            _ = cancel.cancelled() => Vec::new(),
            steps = self.run_steps(run_id) => steps.unwrap_or_else(|e| {
                warn!("Failed to list steps of run {}: {}", run_id, e);
                Vec::new()
            }),
        }
    }

    async fn exchange(
        &self,
        instructions: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<Exchange, SessionError> {
        let run = self.start_run(instructions).await?;
        let outcome = self.wait_for_completion(&run, cancel).await?;
        let steps = self.trace(&run.id, cancel).await;

        Ok(Exchange {
            run_id: run.id,
            outcome,
            steps,
        })
    }
}
