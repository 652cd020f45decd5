//! Service layer
//!
//! Services answer the tool calls a run asks for. The registry maps function
//! names to handlers, the dispatcher executes a batch of calls and reports
//! their outputs, and the news tool is the one capability shipped here.
//!
//! Tools are trait-based so new capabilities can be registered alongside
//! the news lookup.

mod dispatcher;
mod news;
pub(crate) mod tools;

pub use dispatcher::ToolDispatcher;
pub use news::{GET_NEWS, GetNewsTool, format_articles};
pub use tools::{RegistryError, Tool, ToolError, ToolRegistry, parse_arguments};
