//! In-memory state of one editing session.
//!
//! Content is not stored here; it lives in the [`crate::ContentSurface`] and
//! is read at snapshot time.

use crate::identity::DraftId;
use chrono::{DateTime, Utc};
use quillpost_core::models::blog::normalize_tags;

/// Ordered tag list with trimmed, non-empty, case-insensitively unique values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(normalize_tags(tags))
    }

    /// Append a tag unless it is blank or already present.
    ///
    /// # Returns
    /// `true` when the set changed.
    pub fn insert(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        let mut next = std::mem::take(&mut self.0);
        next.push(tag.to_string());
        self.0 = normalize_tags(next);
        self.0.len() != before
    }

    /// Remove a tag, ignoring case.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        let tag = tag.trim();
        self.0.retain(|existing| !existing.eq_ignore_ascii_case(tag));
        self.0.len() != before
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Proof that a save was started; hand it back to [`EditingSession::finish_save`].
#[derive(Debug)]
#[must_use]
pub struct SaveTicket {
    epoch: u64,
}

/// Mutable state of the document being edited.
#[derive(Debug)]
pub struct EditingSession {
    draft_id: DraftId,
    resumed_from: Option<String>,
    title: String,
    tags: TagSet,
    last_saved_at: Option<DateTime<Utc>>,
    saves_in_flight: usize,
    publish_in_flight: bool,
    epoch: u64,
}

impl EditingSession {
    /// Start a session, resuming `existing_id` when supplied.
    pub fn start(existing_id: Option<&str>) -> Self {
        let draft_id = DraftId::resolve(existing_id);
        let resumed_from = existing_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        Self {
            draft_id,
            resumed_from,
            title: String::new(),
            tags: TagSet::default(),
            last_saved_at: None,
            saves_in_flight: 0,
            publish_in_flight: false,
            epoch: 0,
        }
    }

    pub fn draft_id(&self) -> &DraftId {
        &self.draft_id
    }

    /// Id of the existing document this session edits, if any.
    pub fn resumed_from(&self) -> Option<&str> {
        self.resumed_from.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn set_tags(&mut self, tags: TagSet) {
        self.tags = tags;
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// True while at least one save has not resolved.
    pub fn save_in_flight(&self) -> bool {
        self.saves_in_flight > 0
    }

    pub fn publish_in_flight(&self) -> bool {
        self.publish_in_flight
    }

    /// Bumped on every reset.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn begin_save(&mut self) -> SaveTicket {
        self.saves_in_flight += 1;
        SaveTicket { epoch: self.epoch }
    }

    /// Resolve a save. `saved_at` is `Some` on success.
    ///
    /// Tickets from before the last reset are ignored.
    ///
    /// # Returns
    /// `true` when the ticket belonged to the current session.
    pub fn finish_save(&mut self, ticket: SaveTicket, saved_at: Option<DateTime<Utc>>) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        if let Some(at) = saved_at {
            self.last_saved_at = Some(at);
        }
        true
    }

    /// Claim the publish guard.
    ///
    /// # Returns
    /// `false` when a publish already holds it.
    pub fn begin_publish(&mut self) -> bool {
        if self.publish_in_flight {
            return false;
        }
        self.publish_in_flight = true;
        true
    }

    pub fn end_publish(&mut self) {
        self.publish_in_flight = false;
    }

    /// Replace this session with a fresh document under a new draft id.
    pub fn reset(&mut self) {
        self.draft_id = DraftId::generate();
        self.resumed_from = None;
        self.title.clear();
        self.tags = TagSet::default();
        self.last_saved_at = None;
        self.saves_in_flight = 0;
        self.epoch += 1;
    }
}
