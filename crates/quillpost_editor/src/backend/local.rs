//! In-process backend over a redb [`Database`].

use super::BlogBackend;
use crate::error::BackendError;
use quillpost_core::models::blog::{Blog, BlogStatus, PublishRequest, SaveDraftRequest};
use quillpost_core::{AppError, Database};
use std::sync::Arc;

/// Backend that runs store calls on tokio's blocking pool.
#[derive(Clone)]
pub struct LocalBackend {
    db: Arc<Database>,
}

impl LocalBackend {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Wrap a handle that is also used elsewhere in the process (for example
    /// by the HTTP server).
    pub fn from_shared(db: Arc<Database>) -> Self {
        Self { db }
    }

    async fn run<T, F>(&self, op: F) -> Result<T, BackendError>
    where
        T: Send + 'static,
        F: FnOnce(&Database) -> Result<T, AppError> + Send + 'static,
    {
        let db = self.db.clone();
        let value = tokio::task::spawn_blocking(move || op(&db)).await??;
        Ok(value)
    }
}

impl BlogBackend for LocalBackend {
    async fn save_draft(&self, id: &str, draft: SaveDraftRequest) -> Result<Blog, BackendError> {
        let id = id.to_string();
        self.run(move |db| db.blogs.save_draft(&id, draft)).await
    }

    async fn publish_blog(&self, post: PublishRequest) -> Result<Blog, BackendError> {
        self.run(move |db| db.blogs.publish(post)).await
    }

    async fn delete_draft(&self, id: &str) -> Result<bool, BackendError> {
        let id = id.to_string();
        self.run(move |db| db.blogs.delete_draft(&id)).await
    }

    async fn get_user_blogs(
        &self,
        author_id: &str,
        status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, BackendError> {
        let author_id = author_id.to_string();
        self.run(move |db| db.blogs.list_for_author(&author_id, status))
            .await
    }

    async fn get_blog(&self, id: &str) -> Result<Option<Blog>, BackendError> {
        let id = id.to_string();
        self.run(move |db| db.blogs.get(&id)).await
    }

    async fn increment_views(&self, id: &str) -> Result<Option<u64>, BackendError> {
        let id = id.to_string();
        self.run(move |db| db.blogs.increment_views(&id)).await
    }

    async fn bulk_delete_blogs(&self, ids: &[String]) -> Result<usize, BackendError> {
        let ids = ids.to_vec();
        self.run(move |db| db.blogs.bulk_delete(&ids)).await
    }
}
