//! Uploaded file domain types

use serde::{Deserialize, Serialize};

/// A file stored by the assistant service for retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    pub filename: String,
    pub purpose: String,
    #[serde(default)]
    pub bytes: u64,
}

/// Purpose tag used when uploading documents for assistants
pub const ASSISTANTS_PURPOSE: &str = "assistants";
