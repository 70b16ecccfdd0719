//! Draft autosave and publish coordination for QuillPost editing sessions.
//!
//! A [`DraftEditor`] owns one editing session at a time: it debounces title
//! and content edits into draft saves, runs a periodic fallback save, and
//! promotes the draft to a published post on request. Persistence goes
//! through a [`BlogBackend`]; the rich-text surface and the current author are
//! supplied by the caller through [`ContentSurface`] and [`IdentityProvider`].

/// Persistence contract plus in-process and HTTP implementations.
pub mod backend;
/// Save coordinator and publish transition.
pub mod coordinator;
/// Trailing-edge debounced invoker.
pub mod debounce;
/// High-level editor wiring debouncers, timers, and the coordinator.
pub mod editor;
/// Editor error types.
pub mod error;
/// Signals emitted to the UI layer.
pub mod events;
/// Author identity and draft identifiers.
pub mod identity;
/// Owned periodic fallback save task.
pub mod periodic;
/// In-memory editing session state.
pub mod session;
/// Rich-text surface boundary.
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;
use std::pin::Pin;

/// Boxed future used for caller-supplied async callbacks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use backend::{BlogBackend, HttpBackend, LocalBackend};
pub use coordinator::{Coordinator, PublishHandler, PublishReceipt};
pub use editor::{DraftEditor, EditorOptions};
pub use error::{BackendError, PublishError, ValidationError};
pub use events::{EditorEvent, SaveOutcome, SaveReason, SkipReason};
pub use identity::{Author, DraftId, IdentityProvider, StaticIdentity};
pub use surface::{ContentSurface, SharedSurface, EMPTY_DOCUMENT_HTML};
