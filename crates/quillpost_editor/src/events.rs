//! Signals emitted to the UI layer and save request vocabulary.
//!
//! Rendering (toasts, status lines) is the caller's concern; the editor only
//! pushes [`EditorEvent`]s onto a crossbeam channel the UI polls.

use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use std::fmt;

/// What triggered a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveReason {
    TitleEdit,
    ContentEdit,
    TagEdit,
    Periodic,
    Manual,
}

impl SaveReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SaveReason::TitleEdit => "title-edit",
            SaveReason::ContentEdit => "content-edit",
            SaveReason::TagEdit => "tag-edit",
            SaveReason::Periodic => "periodic",
            SaveReason::Manual => "manual",
        }
    }
}

impl fmt::Display for SaveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a save request did not reach the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A publish owns the document.
    PublishInFlight,
    /// Automatic trigger on a blank document.
    EmptyContent,
}

/// Result of one save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { at: DateTime<Utc> },
    Skipped(SkipReason),
    /// Manual save refused before any I/O.
    Rejected(ValidationError),
    Failed { message: String },
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }
}

/// Events produced by the editor and polled by the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// A draft snapshot reached the backend.
    Saved {
        draft_id: String,
        at: DateTime<Utc>,
    },
    /// A draft save failed; the next trigger retries.
    SaveFailed { draft_id: String, message: String },
    /// Input was rejected before any backend call.
    Invalid(ValidationError),
    /// The draft became a published post and a fresh session started.
    Published {
        post_id: String,
        retired_draft_id: String,
        next_draft_id: String,
    },
    /// Publishing failed; the session is unchanged.
    PublishFailed { message: String },
}
