//! Core domain types
//!
//! These types mirror the objects returned by the remote services. The
//! services own them; the client only ever holds snapshots and identifiers.

pub mod assistant;
pub mod file;
pub mod message;
pub mod news;
pub mod run;
pub mod thread;

use serde::{Deserialize, Serialize};

/// A page of objects as returned by the service's list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub first_id: Option<String>,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}
