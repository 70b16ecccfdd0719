//! Publish transition: promote the session's draft to a published post.

use super::Coordinator;
use crate::backend::BlogBackend;
use crate::error::{BackendError, PublishError, ValidationError};
use crate::events::EditorEvent;
use crate::surface::is_blank_document;
use crate::BoxFuture;
use quillpost_core::models::blog::PublishRequest;
use quillpost_core::naming;
use std::sync::Arc;

/// Caller-supplied publish path.
///
/// Resolves to `Ok(true)` when the post was published and `Ok(false)` when
/// the caller declined; both `Ok(false)` and `Err` leave the draft in place.
pub type PublishHandler =
    Arc<dyn Fn(PublishRequest) -> BoxFuture<'static, Result<bool, BackendError>> + Send + Sync>;

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub post_id: String,
    pub retired_draft_id: String,
    pub next_draft_id: String,
    /// Whether the retired draft was actually removed.
    pub draft_deleted: bool,
}

/// Holds the session's publish guard; dropping it releases the guard, so a
/// cancelled publish does not lock saves out.
struct PublishGuard<'a, B: BlogBackend> {
    coordinator: &'a Coordinator<B>,
}

impl<B: BlogBackend> Drop for PublishGuard<'_, B> {
    fn drop(&mut self) {
        self.coordinator.lock_session().end_publish();
    }
}

impl<B: BlogBackend> Coordinator<B> {
    fn reject(&self, error: ValidationError) -> PublishError {
        self.emit(EditorEvent::Invalid(error));
        PublishError::Validation(error)
    }

    /// Publish the current document.
    ///
    /// Validation runs before any I/O. While the publish is in flight every
    /// save request is dropped. On success the draft is deleted (best-effort,
    /// after outstanding saves settle) and the session restarts as an empty
    /// document under a new draft id. On failure the session is untouched so
    /// the user can retry.
    ///
    /// # Errors
    /// - [`PublishError::Validation`] for a blank title or content.
    /// - [`PublishError::AlreadyPublishing`] when another publish holds the guard.
    /// - [`PublishError::Declined`] / [`PublishError::Backend`] when publishing failed.
    pub async fn publish(&self) -> Result<PublishReceipt, PublishError> {
        let content = self.surface.html();
        let author = self.identity.author_or_default();

        let (request, draft_id) = {
            let mut session = self.lock_session();
            if session.publish_in_flight() {
                return Err(PublishError::AlreadyPublishing);
            }
            if session.title().trim().is_empty() {
                drop(session);
                return Err(self.reject(ValidationError::TitleRequired));
            }
            if is_blank_document(&content) {
                drop(session);
                return Err(self.reject(ValidationError::ContentRequired));
            }
            if !session.begin_publish() {
                return Err(PublishError::AlreadyPublishing);
            }

            let post_id = session
                .resumed_from()
                .map(str::to_string)
                .unwrap_or_else(naming::generate_post_id);
            let request = PublishRequest {
                id: post_id,
                title: session.title().trim().to_string(),
                content,
                tags: session.tags().to_vec(),
                author_id: author.id,
                author_name: author.name,
            };
            (request, session.draft_id().to_string())
        };
        let guard = PublishGuard { coordinator: self };

        let post_id = request.id.clone();
        tracing::info!("Publishing draft {} as {}", draft_id, post_id);
        let published = match &self.publish_handler {
            Some(handler) => handler(request).await,
            None => self.backend.publish_blog(request).await.map(|_| true),
        };

        match published {
            Ok(true) => {
                let receipt = self.retire_draft(post_id, draft_id).await;
                drop(guard);
                Ok(receipt)
            }
            Ok(false) => {
                tracing::warn!("Publish of draft {} was declined", draft_id);
                drop(guard);
                self.emit(EditorEvent::PublishFailed {
                    message: PublishError::Declined.to_string(),
                });
                Err(PublishError::Declined)
            }
            Err(err) => {
                tracing::warn!("Failed to publish draft {}: {}", draft_id, err);
                drop(guard);
                self.emit(EditorEvent::PublishFailed {
                    message: err.to_string(),
                });
                Err(PublishError::Backend(err))
            }
        }
    }

    async fn retire_draft(&self, post_id: String, draft_id: String) -> PublishReceipt {
        // A save still in flight would recreate the draft after deletion.
        self.saves_settled().await;

        let draft_deleted = match self.backend.delete_draft(&draft_id).await {
            Ok(deleted) => deleted,
            Err(err) => {
                tracing::warn!(
                    "Published {} but failed to delete draft {}: {}",
                    post_id,
                    draft_id,
                    err
                );
                false
            }
        };

        self.surface.clear();
        let next_draft_id = {
            let mut session = self.lock_session();
            session.reset();
            session.end_publish();
            session.draft_id().to_string()
        };
        tracing::info!("Published {}; new session {}", post_id, next_draft_id);

        self.emit(EditorEvent::Published {
            post_id: post_id.clone(),
            retired_draft_id: draft_id.clone(),
            next_draft_id: next_draft_id.clone(),
        });
        PublishReceipt {
            post_id,
            retired_draft_id: draft_id,
            next_draft_id,
            draft_deleted,
        }
    }
}
