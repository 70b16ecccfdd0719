//! Author identity and draft identifiers.

use quillpost_core::constants::{ANONYMOUS_AUTHOR_ID, ANONYMOUS_AUTHOR_NAME};
use quillpost_core::naming;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The user credited on saved drafts and published posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub name: String,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Fallback author used when no identity is available.
    pub fn anonymous() -> Self {
        Self::new(ANONYMOUS_AUTHOR_ID, ANONYMOUS_AUTHOR_NAME)
    }
}

/// Source of the signed-in user.
pub trait IdentityProvider: Send + Sync {
    /// The current author, or `None` when nobody is signed in.
    fn current_author(&self) -> Option<Author>;

    /// The current author, falling back to [`Author::anonymous`].
    fn author_or_default(&self) -> Author {
        self.current_author().unwrap_or_else(Author::anonymous)
    }
}

/// Fixed identity, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<Author>);

impl StaticIdentity {
    pub fn new(author: Author) -> Self {
        Self(Some(author))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_author(&self) -> Option<Author> {
        self.0.clone()
    }
}

/// Key under which a session's draft is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DraftId(String);

impl DraftId {
    /// Reuse `existing` when it is a non-blank id, otherwise mint a new one.
    pub fn resolve(existing: Option<&str>) -> Self {
        match existing.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self(id.to_string()),
            None => Self::generate(),
        }
    }

    /// Mint a fresh process-unique draft id.
    pub fn generate() -> Self {
        Self(naming::generate_draft_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DraftId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
