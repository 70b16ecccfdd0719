//! Persistence contract consumed by the coordinator.
//!
//! The coordinator only needs `save_draft`, `publish_blog` and `delete_draft`;
//! the read and administrative calls complete the collaborator boundary for
//! dashboards and the CLI.

mod http;
mod local;

pub use http::HttpBackend;
pub use local::LocalBackend;

use crate::error::BackendError;
use quillpost_core::models::blog::{Blog, BlogStatus, PublishRequest, SaveDraftRequest};
use std::future::Future;

/// Blog persistence backend.
///
/// Implementations must be thread-safe (`Send + Sync`) because debounced and
/// periodic saves run on spawned tasks.
pub trait BlogBackend: Send + Sync + 'static {
    /// Upsert the full draft snapshot keyed by `id`.
    ///
    /// Repeating the call with the same snapshot only advances `updated_at`.
    fn save_draft(
        &self,
        id: &str,
        draft: SaveDraftRequest,
    ) -> impl Future<Output = Result<Blog, BackendError>> + Send;

    /// Create or overwrite a published post.
    fn publish_blog(
        &self,
        post: PublishRequest,
    ) -> impl Future<Output = Result<Blog, BackendError>> + Send;

    /// Delete the draft stored under `id`.
    ///
    /// # Returns
    /// Whether a draft existed. Callers treat failure as best-effort.
    fn delete_draft(&self, id: &str) -> impl Future<Output = Result<bool, BackendError>> + Send;

    /// List an author's posts, newest first, optionally filtered by status.
    fn get_user_blogs(
        &self,
        author_id: &str,
        status: Option<BlogStatus>,
    ) -> impl Future<Output = Result<Vec<Blog>, BackendError>> + Send;

    /// Fetch one post (published preferred over a pending draft).
    fn get_blog(&self, id: &str)
        -> impl Future<Output = Result<Option<Blog>, BackendError>> + Send;

    /// Bump the view counter of a published post.
    ///
    /// # Returns
    /// The new count, or `None` when no published post has `id`.
    fn increment_views(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<u64>, BackendError>> + Send;

    /// Delete several posts and drafts.
    ///
    /// # Returns
    /// Number of rows removed.
    fn bulk_delete_blogs(
        &self,
        ids: &[String],
    ) -> impl Future<Output = Result<usize, BackendError>> + Send;
}
