//! Tool registry
//!
//! Maps function names the assistant may call to local handlers. Names are
//! validated and de-duplicated when a tool is registered, so a registry that
//! was built successfully can always be advertised to the assistant.

use async_trait::async_trait;
use newsdesk_core::domain::assistant::{FunctionDefinition, ToolDefinition};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while executing a single tool call
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered
    #[error("unknown function '{0}'")]
    UnknownTool(String),

    /// Arguments are not valid JSON or miss a required field
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool ran but its backing service failed
    #[error("{0}")]
    Failed(String),
}

/// Errors produced while building a registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    Duplicate(String),

    #[error("invalid tool name '{0}': expected 1-64 characters of [a-zA-Z0-9_-]")]
    InvalidName(String),
}

/// A locally executed function the assistant can request
#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name as seen by the assistant
    fn name(&self) -> &str;

    /// Human-readable description sent to the assistant
    fn description(&self) -> &str;

    /// JSON schema of the arguments object
    fn parameters(&self) -> JsonValue;

    /// Executes the tool
    ///
    /// # Arguments
    /// * `arguments` - The decoded arguments object
    ///
    /// # Returns
    /// Plain text submitted back to the run as the tool's output
    async fn call(&self, arguments: JsonValue) -> Result<String, ToolError>;
}

/// Decodes a tool's arguments into a typed struct
pub fn parse_arguments<T: DeserializeOwned>(arguments: JsonValue) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Registry of tools keyed by name
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, rejecting invalid or duplicate names
    pub fn register(&mut self, tool: impl Tool + 'static) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(tool))
    }

    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<(), RegistryError> {
        let name = tool.name().to_string();

        if !is_valid_name(&name) {
            return Err(RegistryError::InvalidName(name));
        }
        if self.tools.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        self.tools.insert(name, tool);
        Ok(())
    }

    /// Looks up a tool by function name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Function tool definitions to enable on a new assistant
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition::Function {
                function: FunctionDefinition {
                    name: tool.name().to_string(),
                    description: Some(tool.description().to_string()),
                    parameters: tool.parameters(),
                },
            })
            .collect()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn is_valid_name(name: &str) -> bool {
    (1..=64).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
