//! Blog post models shared by the store, the HTTP API, and the editor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a stored post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    Draft,
    Published,
}

impl BlogStatus {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(BlogStatus::Draft),
            "published" => Ok(BlogStatus::Published),
            other => Err(format!("unknown blog status '{}'", other)),
        }
    }
}

/// A stored post. Drafts and published posts share one row shape; the store
/// keeps them in separate tables and stamps [`BlogStatus`] accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
    pub status: BlogStatus,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full draft snapshot written by every save. The id travels separately
/// (path segment or backend argument) because it is the upsert key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDraftRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
}

/// Snapshot promoted into a published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: String,
    pub author_name: String,
}

/// Query parameters for listing an author's posts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListQuery {
    pub author_id: String,
    pub status: Option<BlogStatus>,
}

/// Request payload for deleting several posts at once.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Number of rows removed by a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

/// View counter after an increment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ViewsResponse {
    pub id: String,
    pub views: u64,
}

impl Blog {
    /// Build a fresh draft row from a save snapshot.
    pub fn new_draft(id: String, req: SaveDraftRequest) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: req.title,
            content: req.content,
            tags: normalize_tags(req.tags),
            author_id: req.author_id,
            author_name: req.author_name,
            status: BlogStatus::Draft,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a fresh published row from a publish snapshot.
    pub fn new_published(req: PublishRequest) -> Self {
        let now = Utc::now();
        Self {
            id: req.id,
            title: req.title,
            content: req.content,
            tags: normalize_tags(req.tags),
            author_id: req.author_id,
            author_name: req.author_name,
            status: BlogStatus::Published,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == BlogStatus::Draft
    }
}

/// Trim tags, drop empties, and remove case-insensitive duplicates while
/// keeping the first spelling and the original order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if normalized
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(trimmed))
        {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}
