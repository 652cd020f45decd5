//! Thread (conversation) domain types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A persistent conversation owned by the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}
