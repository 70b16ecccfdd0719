//! Shared test-only helpers for quillpost_core.

use crate::models::blog::{PublishRequest, SaveDraftRequest};
use crate::Database;
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

pub(crate) fn draft(author_id: &str, title: &str, content: &str) -> SaveDraftRequest {
    SaveDraftRequest {
        title: title.to_string(),
        content: content.to_string(),
        tags: Vec::new(),
        author_id: author_id.to_string(),
        author_name: format!("{} name", author_id),
    }
}

pub(crate) fn publish(id: &str, author_id: &str, title: &str) -> PublishRequest {
    PublishRequest {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("<p>{}</p>", title),
        tags: vec!["news".to_string()],
        author_id: author_id.to_string(),
        author_name: format!("{} name", author_id),
    }
}
