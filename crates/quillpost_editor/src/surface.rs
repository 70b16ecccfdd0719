//! Rich-text surface boundary.
//!
//! The editor never owns document content; it reads HTML from the surface at
//! snapshot time and listens for its change notifications.

use std::sync::Mutex;
use tokio::sync::watch;

/// HTML the rich-text surface produces for an untouched document.
pub const EMPTY_DOCUMENT_HTML: &str = "<p></p>";

/// Whether `html` carries no user content.
pub fn is_blank_document(html: &str) -> bool {
    let trimmed = html.trim();
    trimmed.is_empty() || trimmed == EMPTY_DOCUMENT_HTML
}

/// A rich-text editing surface.
pub trait ContentSurface: Send + Sync {
    /// Current document as HTML.
    fn html(&self) -> String;

    /// Replace the document.
    fn set_html(&self, html: &str);

    /// Reset to the empty document.
    fn clear(&self) {
        self.set_html(EMPTY_DOCUMENT_HTML);
    }

    /// Receiver whose value bumps on every document change.
    fn subscribe(&self) -> watch::Receiver<u64>;
}

/// In-memory surface for headless sessions and tests.
pub struct SharedSurface {
    html: Mutex<String>,
    revision: watch::Sender<u64>,
}

impl SharedSurface {
    pub fn new(initial: &str) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            html: Mutex::new(initial.to_string()),
            revision,
        }
    }
}

impl Default for SharedSurface {
    fn default() -> Self {
        Self::new(EMPTY_DOCUMENT_HTML)
    }
}

impl ContentSurface for SharedSurface {
    fn html(&self) -> String {
        self.html
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_html(&self, html: &str) {
        {
            let mut current = self
                .html
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *current == html {
                return;
            }
            *current = html.to_string();
        }
        self.revision.send_modify(|revision| *revision += 1);
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_documents() {
        assert!(is_blank_document(""));
        assert!(is_blank_document("   \n"));
        assert!(is_blank_document(" <p></p> "));
        assert!(!is_blank_document("<p>x</p>"));
        assert!(!is_blank_document("<p> </p>"));
    }

    #[test]
    fn set_html_notifies_only_on_change() {
        let surface = SharedSurface::default();
        let mut rx = surface.subscribe();
        assert!(!rx.has_changed().expect("sender alive"));

        surface.set_html("<p>hello</p>");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(*rx.borrow_and_update(), 1);

        surface.set_html("<p>hello</p>");
        assert!(!rx.has_changed().expect("sender alive"));

        surface.clear();
        assert_eq!(surface.html(), EMPTY_DOCUMENT_HTML);
        assert!(rx.has_changed().expect("sender alive"));
    }
}
