//! Domain models for the project catalog database.
//!
//! These models are storage-agnostic and represent the rows the store hands
//! back. Tags and links are fetched separately and attached by the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned integer identifier.
pub type Id = i64;

/// Offset-based page of a listing, ordered by primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of items to return.
    pub limit: i64,
    /// Number of items to skip.
    pub offset: i64,
}

impl Page {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// A project record. `end_date` of `None` means the project is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
}

/// A label shared between projects (M:N via project_tag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

/// An external reference owned by a single project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub id: Id,
    pub url: String,
    pub display: String,
    #[serde(rename = "type")]
    pub kind: String,
}
