//! Shared test-only helpers for quillpost_editor.

use crate::backend::BlogBackend;
use crate::coordinator::{Coordinator, PublishHandler};
use crate::error::BackendError;
use crate::events::EditorEvent;
use crate::identity::{Author, StaticIdentity};
use crate::session::EditingSession;
use crate::surface::{ContentSurface, SharedSurface};
use crossbeam_channel::Receiver;
use quillpost_core::models::blog::{Blog, BlogStatus, PublishRequest, SaveDraftRequest};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend call as observed by [`FakeBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    SaveDraft(String),
    Publish(String),
    DeleteDraft(String),
}

/// In-memory backend with injectable failures and latency.
#[derive(Default)]
pub(crate) struct FakeBackend {
    drafts: Mutex<HashMap<String, SaveDraftRequest>>,
    posts: Mutex<HashMap<String, PublishRequest>>,
    calls: Mutex<Vec<Call>>,
    pub fail_saves: AtomicBool,
    pub fail_publish: AtomicBool,
    pub fail_delete: AtomicBool,
    save_delay_ms: AtomicU64,
    publish_delay_ms: AtomicU64,
}

fn injected(what: &str) -> BackendError {
    BackendError::Status {
        status: 503,
        message: format!("{} unavailable", what),
    }
}

impl FakeBackend {
    pub(crate) fn set_save_delay(&self, delay: Duration) {
        self.save_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub(crate) fn set_publish_delay(&self, delay: Duration) {
        self.publish_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub(crate) fn save_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::SaveDraft(_)))
            .count()
    }

    pub(crate) fn draft(&self, id: &str) -> Option<SaveDraftRequest> {
        self.drafts.lock().expect("drafts lock").get(id).cloned()
    }

    pub(crate) fn post(&self, id: &str) -> Option<PublishRequest> {
        self.posts.lock().expect("posts lock").get(id).cloned()
    }

    pub(crate) fn seed_draft(&self, id: &str, draft: SaveDraftRequest) {
        self.drafts
            .lock()
            .expect("drafts lock")
            .insert(id.to_string(), draft);
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }

    async fn pause(delay_ms: &AtomicU64) {
        let delay = delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }
}

impl BlogBackend for FakeBackend {
    async fn save_draft(&self, id: &str, draft: SaveDraftRequest) -> Result<Blog, BackendError> {
        self.record(Call::SaveDraft(id.to_string()));
        Self::pause(&self.save_delay_ms).await;
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(injected("save"));
        }
        self.seed_draft(id, draft.clone());
        Ok(Blog::new_draft(id.to_string(), draft))
    }

    async fn publish_blog(&self, post: PublishRequest) -> Result<Blog, BackendError> {
        self.record(Call::Publish(post.id.clone()));
        Self::pause(&self.publish_delay_ms).await;
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(injected("publish"));
        }
        self.posts
            .lock()
            .expect("posts lock")
            .insert(post.id.clone(), post.clone());
        Ok(Blog::new_published(post))
    }

    async fn delete_draft(&self, id: &str) -> Result<bool, BackendError> {
        self.record(Call::DeleteDraft(id.to_string()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected("delete"));
        }
        Ok(self.drafts.lock().expect("drafts lock").remove(id).is_some())
    }

    async fn get_user_blogs(
        &self,
        _author_id: &str,
        _status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, BackendError> {
        Ok(Vec::new())
    }

    async fn get_blog(&self, _id: &str) -> Result<Option<Blog>, BackendError> {
        Ok(None)
    }

    async fn increment_views(&self, _id: &str) -> Result<Option<u64>, BackendError> {
        Ok(None)
    }

    async fn bulk_delete_blogs(&self, _ids: &[String]) -> Result<usize, BackendError> {
        Ok(0)
    }
}

pub(crate) struct Harness {
    pub coordinator: Arc<Coordinator<FakeBackend>>,
    pub backend: Arc<FakeBackend>,
    pub surface: Arc<SharedSurface>,
    pub events: Receiver<EditorEvent>,
}

pub(crate) fn test_author() -> Author {
    Author::new("author-1", "Ada")
}

pub(crate) fn harness(existing_id: Option<&str>) -> Harness {
    harness_with(existing_id, None)
}

pub(crate) fn harness_with(existing_id: Option<&str>, handler: Option<PublishHandler>) -> Harness {
    let backend = Arc::new(FakeBackend::default());
    let surface = Arc::new(SharedSurface::default());
    let (events_tx, events) = crossbeam_channel::unbounded();
    let content: Arc<dyn ContentSurface> = surface.clone();
    let mut coordinator = Coordinator::new(
        backend.clone(),
        content,
        Arc::new(StaticIdentity::new(test_author())),
        EditingSession::start(existing_id),
        events_tx,
    );
    if let Some(handler) = handler {
        coordinator = coordinator.with_publish_handler(handler);
    }
    Harness {
        coordinator: Arc::new(coordinator),
        backend,
        surface,
        events,
    }
}

pub(crate) fn drain(events: &Receiver<EditorEvent>) -> Vec<EditorEvent> {
    events.try_iter().collect()
}
