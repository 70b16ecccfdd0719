//! Save coordinator: the single entry point for every draft write.
//!
//! Debounced edits, the periodic timer, and manual saves all end up in
//! [`Coordinator::request_save`]. The publish transition lives in
//! `publish.rs` and holds the session's publish guard for its whole duration;
//! while it is held no save reaches the backend.

mod publish;

pub use publish::{PublishHandler, PublishReceipt};

use crate::backend::BlogBackend;
use crate::error::ValidationError;
use crate::events::{EditorEvent, SaveOutcome, SaveReason, SkipReason};
use crate::identity::IdentityProvider;
use crate::session::{EditingSession, SaveTicket, TagSet};
use crate::surface::{is_blank_document, ContentSurface};
use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use quillpost_core::models::blog::SaveDraftRequest;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

/// Coordinates saves and publishes for one editing session at a time.
pub struct Coordinator<B> {
    backend: Arc<B>,
    surface: Arc<dyn ContentSurface>,
    identity: Arc<dyn IdentityProvider>,
    publish_handler: Option<PublishHandler>,
    session: Mutex<EditingSession>,
    saves_settled: Notify,
    events: Sender<EditorEvent>,
}

impl<B: BlogBackend> Coordinator<B> {
    pub fn new(
        backend: Arc<B>,
        surface: Arc<dyn ContentSurface>,
        identity: Arc<dyn IdentityProvider>,
        session: EditingSession,
        events: Sender<EditorEvent>,
    ) -> Self {
        Self {
            backend,
            surface,
            identity,
            publish_handler: None,
            session: Mutex::new(session),
            saves_settled: Notify::new(),
            events,
        }
    }

    /// Route publishes through `handler` instead of `backend.publish_blog`.
    pub fn with_publish_handler(mut self, handler: PublishHandler) -> Self {
        self.publish_handler = Some(handler);
        self
    }

    pub fn surface(&self) -> &Arc<dyn ContentSurface> {
        &self.surface
    }

    // Never held across an await.
    fn lock_session(&self) -> MutexGuard<'_, EditingSession> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn draft_id(&self) -> String {
        self.lock_session().draft_id().to_string()
    }

    pub fn title(&self) -> String {
        self.lock_session().title().to_string()
    }

    pub fn set_title(&self, title: &str) {
        self.lock_session().set_title(title);
    }

    pub fn tags(&self) -> Vec<String> {
        self.lock_session().tags().to_vec()
    }

    pub fn set_tags(&self, tags: TagSet) {
        self.lock_session().set_tags(tags);
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.lock_session().last_saved_at()
    }

    pub fn save_in_flight(&self) -> bool {
        self.lock_session().save_in_flight()
    }

    pub fn publish_in_flight(&self) -> bool {
        self.lock_session().publish_in_flight()
    }

    fn emit(&self, event: EditorEvent) {
        let _ = self.events.send(event);
    }

    /// Whether the document has a non-empty title or content.
    pub fn has_material(&self) -> bool {
        let content = self.surface.html();
        let title_blank = self.lock_session().title().trim().is_empty();
        !title_blank || !is_blank_document(&content)
    }

    /// Write the current snapshot to the draft record.
    ///
    /// Dropped while a publish is in flight. A blank document is ignored for
    /// automatic triggers and rejected for [`SaveReason::Manual`]. Overlapping
    /// requests are not queued; each one issues its own full-snapshot upsert
    /// and the backend keeps the last write.
    ///
    /// # Returns
    /// What happened to the request. The same result is reported on the
    /// event channel for saves that reached the backend.
    pub async fn request_save(&self, reason: SaveReason) -> SaveOutcome {
        let content = self.surface.html();
        let author = self.identity.author_or_default();

        let (ticket, draft_id, request) = {
            let mut session = self.lock_session();
            if session.publish_in_flight() {
                tracing::debug!("Dropping {} save: publish in flight", reason);
                return SaveOutcome::Skipped(SkipReason::PublishInFlight);
            }
            if is_blank_document(&content) {
                if reason == SaveReason::Manual {
                    drop(session);
                    self.emit(EditorEvent::Invalid(ValidationError::ContentRequired));
                    return SaveOutcome::Rejected(ValidationError::ContentRequired);
                }
                tracing::trace!("Ignoring {} save of a blank document", reason);
                return SaveOutcome::Skipped(SkipReason::EmptyContent);
            }

            let ticket = session.begin_save();
            let request = SaveDraftRequest {
                title: session.title().to_string(),
                content,
                tags: session.tags().to_vec(),
                author_id: author.id,
                author_name: author.name,
            };
            (ticket, session.draft_id().to_string(), request)
        };

        let in_flight = InFlightSave {
            coordinator: self,
            ticket: Some(ticket),
        };
        let result = self.backend.save_draft(&draft_id, request).await;

        let (outcome, current) = match result {
            Ok(_) => {
                let at = Utc::now();
                (SaveOutcome::Saved { at }, in_flight.finish(Some(at)))
            }
            Err(err) => {
                let message = err.to_string();
                (SaveOutcome::Failed { message }, in_flight.finish(None))
            }
        };

        match &outcome {
            SaveOutcome::Saved { at } => {
                tracing::debug!("Saved draft {} ({})", draft_id, reason);
                if current {
                    self.emit(EditorEvent::Saved { draft_id, at: *at });
                }
            }
            SaveOutcome::Failed { message } => {
                tracing::warn!("Failed to save draft {} ({}): {}", draft_id, reason, message);
                if current {
                    self.emit(EditorEvent::SaveFailed {
                        draft_id,
                        message: message.clone(),
                    });
                }
            }
            _ => {}
        }
        outcome
    }

    /// Periodic fallback: save only when there is something to save and no
    /// publish owns the document.
    ///
    /// # Returns
    /// `None` when the tick was not eligible.
    pub async fn periodic_save(&self) -> Option<SaveOutcome> {
        if self.publish_in_flight() || !self.has_material() {
            tracing::trace!("Periodic save skipped");
            return None;
        }
        Some(self.request_save(SaveReason::Periodic).await)
    }

    /// Resolve `ticket`, waking publishers once no save is outstanding.
    fn settle_save(&self, ticket: SaveTicket, saved_at: Option<DateTime<Utc>>) -> bool {
        let (current, settled) = {
            let mut session = self.lock_session();
            let current = session.finish_save(ticket, saved_at);
            (current, !session.save_in_flight())
        };
        if settled {
            self.saves_settled.notify_waiters();
        }
        current
    }

    /// Resolve once no save issued by the current session is outstanding.
    async fn saves_settled(&self) {
        loop {
            let notified = self.saves_settled.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            let busy = self.lock_session().save_in_flight();
            if !busy {
                return;
            }
            notified.await;
        }
    }
}

/// A save between `begin_save` and its backend result. Dropping it unresolved
/// (the save future was cancelled) counts as a failed save.
struct InFlightSave<'a, B: BlogBackend> {
    coordinator: &'a Coordinator<B>,
    ticket: Option<SaveTicket>,
}

impl<B: BlogBackend> InFlightSave<'_, B> {
    /// # Returns
    /// `true` when the save belonged to the current session.
    fn finish(mut self, saved_at: Option<DateTime<Utc>>) -> bool {
        match self.ticket.take() {
            Some(ticket) => self.coordinator.settle_save(ticket, saved_at),
            None => false,
        }
    }
}

impl<B: BlogBackend> Drop for InFlightSave<'_, B> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            tracing::debug!("Save cancelled before the backend answered");
            self.coordinator.settle_save(ticket, None);
        }
    }
}
