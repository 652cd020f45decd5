//! Data Transfer Objects sent to the assistant service
//!
//! Request bodies are kept apart from the domain snapshots because the
//! service accepts a narrower shape than it returns.

pub mod assistant;
pub mod message;
pub mod run;
