//! Database handle tests.

use super::*;
use crate::test_support::{draft, setup_temp_db};
use std::sync::Arc;
use std::thread;

#[test]
fn shared_handles_see_each_others_writes() {
    let (db, _temp) = setup_temp_db();
    let shared = db.share().expect("share");
    db.blogs
        .save_draft("d1", draft("user-1", "t", "c"))
        .expect("save");
    assert!(shared.blogs.get("d1").expect("get").is_some());
}

#[test]
fn reopening_a_closed_database_keeps_rows() {
    let temp = tempfile::TempDir::new().expect("temp dir");
    let path = temp.path().join("db");
    let path = path.to_str().expect("path");
    {
        let db = Database::new(path).expect("open");
        db.blogs
            .save_draft("d1", draft("user-1", "persisted", "c"))
            .expect("save");
    }
    let reopened = Database::new(path).expect("reopen");
    let blog = reopened.blogs.get("d1").expect("get").expect("row");
    assert_eq!(blog.title, "persisted");
}

#[test]
fn concurrent_saves_to_one_key_leave_a_single_row() {
    let (db, _temp) = setup_temp_db();
    let db = Arc::new(db);
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let db = db.clone();
            thread::spawn(move || {
                db.blogs
                    .save_draft("d1", draft("user-1", &format!("title {}", i), "c"))
                    .expect("save");
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("join");
    }

    let rows = db.blogs.list_for_author("user-1", None).expect("list");
    assert_eq!(rows.len(), 1);
    assert!(rows[0].title.starts_with("title "));
}
