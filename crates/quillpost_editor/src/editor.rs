//! Editor facade wiring debouncers, the periodic saver, and the coordinator.

use crate::backend::BlogBackend;
use crate::coordinator::{Coordinator, PublishHandler, PublishReceipt};
use crate::debounce::Debouncer;
use crate::error::PublishError;
use crate::events::{EditorEvent, SaveOutcome, SaveReason};
use crate::identity::IdentityProvider;
use crate::periodic::PeriodicSaver;
use crate::session::{EditingSession, TagSet};
use crate::surface::ContentSurface;
use crate::BoxFuture;
use crossbeam_channel::Receiver;
use quillpost_core::constants::{
    DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_CONTENT_SAVE_DEBOUNCE_MS,
    DEFAULT_TITLE_SAVE_DEBOUNCE_MS,
};
use quillpost_core::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Timing and publish options for a [`DraftEditor`].
#[derive(Clone)]
pub struct EditorOptions {
    pub title_debounce: Duration,
    pub content_debounce: Duration,
    pub auto_save_interval: Duration,
    /// Publish through this callback instead of the backend.
    pub publish_handler: Option<PublishHandler>,
}

impl EditorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title_debounce: config.title_debounce(),
            content_debounce: config.content_debounce(),
            auto_save_interval: config.auto_save_period(),
            publish_handler: None,
        }
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            title_debounce: Duration::from_millis(DEFAULT_TITLE_SAVE_DEBOUNCE_MS),
            content_debounce: Duration::from_millis(DEFAULT_CONTENT_SAVE_DEBOUNCE_MS),
            auto_save_interval: Duration::from_millis(DEFAULT_AUTO_SAVE_INTERVAL_MS),
            publish_handler: None,
        }
    }
}

/// One live editing session.
///
/// Title edits save after the title quiet window (empty titles are not
/// saved); content and tag edits share the content quiet window; a periodic
/// timer saves as a fallback. The UI polls [`DraftEditor::events`] for
/// saved/failed/published signals.
///
/// Must be created inside a tokio runtime.
pub struct DraftEditor<B: BlogBackend> {
    coordinator: Arc<Coordinator<B>>,
    title_saves: Debouncer<String>,
    content_saves: Arc<Debouncer<SaveReason>>,
    periodic: PeriodicSaver,
    surface_watch: JoinHandle<()>,
    events: Receiver<EditorEvent>,
}

impl<B: BlogBackend> DraftEditor<B> {
    /// Start a session, resuming `existing_id` when supplied.
    pub fn start(
        backend: Arc<B>,
        surface: Arc<dyn ContentSurface>,
        identity: Arc<dyn IdentityProvider>,
        existing_id: Option<&str>,
        options: EditorOptions,
    ) -> Self {
        let (events_tx, events) = crossbeam_channel::unbounded();
        let mut coordinator = Coordinator::new(
            backend,
            surface.clone(),
            identity,
            EditingSession::start(existing_id),
            events_tx,
        );
        if let Some(handler) = options.publish_handler {
            coordinator = coordinator.with_publish_handler(handler);
        }
        let coordinator = Arc::new(coordinator);

        let title_saves = Debouncer::new(options.title_debounce, {
            let coordinator = coordinator.clone();
            move |title: String| -> BoxFuture<'static, ()> {
                let coordinator = coordinator.clone();
                Box::pin(async move {
                    if title.trim().is_empty() {
                        return;
                    }
                    coordinator.request_save(SaveReason::TitleEdit).await;
                })
            }
        });

        let content_saves = Arc::new(Debouncer::new(options.content_debounce, {
            let coordinator = coordinator.clone();
            move |reason: SaveReason| -> BoxFuture<'static, ()> {
                let coordinator = coordinator.clone();
                Box::pin(async move {
                    coordinator.request_save(reason).await;
                })
            }
        }));

        let periodic = PeriodicSaver::start(options.auto_save_interval, {
            let coordinator = coordinator.clone();
            move || -> BoxFuture<'static, ()> {
                let coordinator = coordinator.clone();
                Box::pin(async move {
                    coordinator.periodic_save().await;
                })
            }
        });

        let surface_watch = tokio::spawn({
            let content_saves = content_saves.clone();
            let mut changes = surface.subscribe();
            async move {
                while changes.changed().await.is_ok() {
                    content_saves.call(SaveReason::ContentEdit);
                }
            }
        });

        tracing::debug!("Editing session {} started", coordinator.draft_id());
        Self {
            coordinator,
            title_saves,
            content_saves,
            periodic,
            surface_watch,
            events,
        }
    }

    pub fn coordinator(&self) -> &Arc<Coordinator<B>> {
        &self.coordinator
    }

    /// UI event stream.
    pub fn events(&self) -> &Receiver<EditorEvent> {
        &self.events
    }

    pub fn draft_id(&self) -> String {
        self.coordinator.draft_id()
    }

    pub fn title_changed(&self, title: &str) {
        self.coordinator.set_title(title);
        self.title_saves.call(title.to_string());
    }

    /// Replace the document; the surface notification schedules the save.
    pub fn set_content(&self, html: &str) {
        self.coordinator.surface().set_html(html);
    }

    pub fn tags_changed<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.coordinator.set_tags(TagSet::new(tags));
        self.content_saves.call(SaveReason::TagEdit);
    }

    /// Explicit save, bypassing the debouncers.
    pub async fn save_now(&self) -> SaveOutcome {
        self.coordinator.request_save(SaveReason::Manual).await
    }

    /// Publish and, on success, drop edits still waiting in the debouncers.
    ///
    /// # Errors
    /// See [`Coordinator::publish`].
    pub async fn publish(&self) -> Result<PublishReceipt, PublishError> {
        let receipt = self.coordinator.publish().await?;
        self.title_saves.cancel();
        self.content_saves.cancel();
        Ok(receipt)
    }

    /// End the session: pending edits are flushed, the periodic timer and
    /// the surface subscription stop.
    pub fn end_session(&self) {
        self.title_saves.flush();
        self.content_saves.flush();
        self.periodic.stop();
        self.surface_watch.abort();
        tracing::debug!("Editing session {} ended", self.coordinator.draft_id());
    }

    /// Whether the periodic timer is still running.
    pub fn is_active(&self) -> bool {
        self.periodic.is_running()
    }
}

impl<B: BlogBackend> Drop for DraftEditor<B> {
    fn drop(&mut self) {
        self.surface_watch.abort();
    }
}
