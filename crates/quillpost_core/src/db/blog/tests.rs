use super::*;
use crate::test_support::{draft, publish, setup_temp_db};
use std::thread;

#[test]
fn save_draft_upserts_in_place_and_keeps_created_at() {
    let (db, _temp) = setup_temp_db();

    let first = db
        .blogs
        .save_draft("d1", draft("user-1", "Hello", "<p>one</p>"))
        .expect("first save");
    let second = db
        .blogs
        .save_draft("d1", draft("user-1", "Hello again", "<p>two</p>"))
        .expect("second save");

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    let stored = db.blogs.get("d1").expect("get").expect("draft exists");
    assert_eq!(stored.title, "Hello again");
    assert_eq!(stored.content, "<p>two</p>");
    assert_eq!(
        db.blogs
            .list_for_author("user-1", None)
            .expect("list")
            .len(),
        1,
        "upsert must not duplicate the row or its recency entry"
    );
}

#[test]
fn identical_saves_change_only_updated_at() {
    let (db, _temp) = setup_temp_db();
    let first = db
        .blogs
        .save_draft("d1", draft("user-1", "Hello", "<p>World</p>"))
        .expect("save");
    let second = db
        .blogs
        .save_draft("d1", draft("user-1", "Hello", "<p>World</p>"))
        .expect("save again");

    let normalize = |mut blog: Blog| {
        blog.updated_at = blog.created_at;
        blog
    };
    assert_eq!(normalize(first), normalize(second));
}

#[test]
fn save_draft_rejects_empty_id() {
    let (db, _temp) = setup_temp_db();
    let err = db
        .blogs
        .save_draft("  ", draft("user-1", "t", "c"))
        .expect_err("empty id");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn delete_draft_leaves_published_posts_alone() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .save_draft("d1", draft("user-1", "t", "c"))
        .expect("save");
    db.blogs
        .publish(publish("p1", "user-1", "Live"))
        .expect("publish");

    assert!(db.blogs.delete_draft("d1").expect("delete draft"));
    assert!(!db.blogs.delete_draft("d1").expect("second delete is a no-op"));
    assert!(!db.blogs.delete_draft("p1").expect("published is not a draft"));
    assert!(db.blogs.get("p1").expect("get").is_some());
    assert!(db.blogs.get("d1").expect("get").is_none());
}

#[test]
fn resumed_post_keeps_its_live_row_while_a_draft_is_pending() {
    let (db, _temp) = setup_temp_db();
    let live = db
        .blogs
        .publish(publish("blog-1", "user-1", "Live"))
        .expect("publish");
    db.blogs
        .save_draft("blog-1", draft("user-1", "Edited", "<p>new</p>"))
        .expect("draft over resumed post");

    let fetched = db.blogs.get("blog-1").expect("get").expect("row");
    assert_eq!(fetched.status, BlogStatus::Published);
    assert_eq!(fetched.title, "Live");
    let pending = db.blogs.get_draft("blog-1").expect("get").expect("draft");
    assert_eq!(pending.title, "Edited");

    let republished = db
        .blogs
        .publish(publish("blog-1", "user-1", "Edited"))
        .expect("republish");
    assert!(db.blogs.delete_draft("blog-1").expect("delete draft"));
    assert_eq!(republished.created_at, live.created_at);
    assert_eq!(
        db.blogs
            .get("blog-1")
            .expect("get")
            .expect("post survives draft delete")
            .title,
        "Edited"
    );
}

#[test]
fn republish_preserves_views() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .publish(publish("p1", "user-1", "First"))
        .expect("publish");
    assert_eq!(db.blogs.increment_views("p1").expect("views"), Some(1));
    assert_eq!(db.blogs.increment_views("p1").expect("views"), Some(2));

    let republished = db
        .blogs
        .publish(publish("p1", "user-1", "Second"))
        .expect("republish");
    assert_eq!(republished.views, 2);
    assert_eq!(republished.title, "Second");
}

#[test]
fn increment_views_only_counts_published_posts() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .save_draft("d1", draft("user-1", "t", "c"))
        .expect("save");
    assert_eq!(db.blogs.increment_views("d1").expect("draft"), None);
    assert_eq!(db.blogs.increment_views("missing").expect("missing"), None);

    let before = db
        .blogs
        .publish(publish("p1", "user-1", "Live"))
        .expect("publish");
    assert_eq!(db.blogs.increment_views("p1").expect("views"), Some(1));
    let after = db.blogs.get_post("p1").expect("get").expect("post");
    assert_eq!(after.updated_at, before.updated_at);
}

#[test]
fn list_for_author_filters_and_orders_by_recency() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .save_draft("d-old", draft("user-1", "old", "c"))
        .expect("save");
    thread::sleep(std::time::Duration::from_millis(5));
    db.blogs
        .publish(publish("p-mid", "user-1", "mid"))
        .expect("publish");
    thread::sleep(std::time::Duration::from_millis(5));
    db.blogs
        .save_draft("d-new", draft("user-1", "new", "c"))
        .expect("save");
    db.blogs
        .save_draft("other", draft("user-2", "theirs", "c"))
        .expect("save");

    let all: Vec<String> = db
        .blogs
        .list_for_author("user-1", None)
        .expect("list")
        .into_iter()
        .map(|blog| blog.id)
        .collect();
    assert_eq!(all, vec!["d-new", "p-mid", "d-old"]);

    let drafts: Vec<String> = db
        .blogs
        .list_for_author("user-1", Some(BlogStatus::Draft))
        .expect("list drafts")
        .into_iter()
        .map(|blog| blog.id)
        .collect();
    assert_eq!(drafts, vec!["d-new", "d-old"]);
}

#[test]
fn bulk_delete_clears_both_tables_and_skips_missing_ids() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .save_draft("d1", draft("user-1", "t", "c"))
        .expect("save");
    db.blogs
        .publish(publish("p1", "user-1", "Live"))
        .expect("publish");

    db.blogs
        .save_draft("p1", draft("user-1", "pending", "c"))
        .expect("pending draft for p1");

    let removed = db
        .blogs
        .bulk_delete(&["d1".to_string(), "p1".to_string(), "ghost".to_string()])
        .expect("bulk delete");
    assert_eq!(removed, 3);
    assert!(db
        .blogs
        .list_for_author("user-1", None)
        .expect("list")
        .is_empty());
    assert_eq!(db.blogs.bulk_delete(&[]).expect("empty"), 0);
}

#[test]
fn padded_ids_address_the_same_rows_as_trimmed_ids() {
    let (db, _temp) = setup_temp_db();
    db.blogs
        .save_draft("  d1 ", draft("user-1", "Hello", "<p>one</p>"))
        .expect("save");
    db.blogs
        .publish(publish(" p1  ", "user-1", "Post"))
        .expect("publish");

    assert_eq!(
        db.blogs.get_draft(" d1").expect("get").map(|blog| blog.id),
        Some("d1".to_string())
    );
    assert_eq!(
        db.blogs.get("p1 ").expect("get").map(|blog| blog.id),
        Some("p1".to_string())
    );
    assert_eq!(db.blogs.increment_views("  p1").expect("views"), Some(1));
    assert!(db.blogs.delete_draft("  d1 ").expect("delete"));
    assert_eq!(
        db.blogs
            .bulk_delete(&[" p1 ".to_string()])
            .expect("bulk delete"),
        1
    );
    assert!(db.blogs.get("p1").expect("get").is_none());
}
