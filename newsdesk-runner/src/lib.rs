//! Newsdesk Runner
//!
//! Drives conversations with a hosted assistant service and answers the
//! function calls its runs request.
//!
//! Architecture:
//! - Configuration: Load settings from `.env` and the environment
//! - Services: Tool registry, dispatcher and the news lookup tool
//! - Scheduler: Run polling, tool call hand-off and answer extraction
//! - Session: One assistant and one thread bound to the poller
//!
//! Front ends (the CLI and the web server) build an [`AssistantSession`]
//! from [`Config`] and call its flows.

pub mod config;
pub mod scheduler;
pub mod service;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use scheduler::{Completion, PollError, PollPolicy, RunOutcome, RunPoller, format_elapsed};
pub use service::{GetNewsTool, Tool, ToolDispatcher, ToolError, ToolRegistry};
pub use session::{Ask, AssistantSession, Exchange, SessionError};
