//! Model-level unit tests.

use super::blog::*;

fn draft_request(title: &str, content: &str) -> SaveDraftRequest {
    SaveDraftRequest {
        title: title.to_string(),
        content: content.to_string(),
        tags: vec!["rust".to_string(), " Rust ".to_string(), "web".to_string()],
        author_id: "user-7".to_string(),
        author_name: "Ada".to_string(),
    }
}

#[test]
fn new_draft_normalizes_tags_and_starts_unviewed() {
    let blog = Blog::new_draft("draft-1".to_string(), draft_request("Hello", "<p>World</p>"));
    assert_eq!(blog.id, "draft-1");
    assert_eq!(blog.status, BlogStatus::Draft);
    assert_eq!(blog.views, 0);
    assert_eq!(blog.tags, vec!["rust".to_string(), "web".to_string()]);
    assert_eq!(blog.created_at, blog.updated_at);
    assert!(blog.is_draft());
}

#[test]
fn new_published_marks_status() {
    let blog = Blog::new_published(PublishRequest {
        id: "blog-1".to_string(),
        title: "Hello".to_string(),
        content: "<p>World</p>".to_string(),
        tags: Vec::new(),
        author_id: "user-7".to_string(),
        author_name: "Ada".to_string(),
    });
    assert_eq!(blog.status, BlogStatus::Published);
    assert!(!blog.is_draft());
}

#[test]
fn normalize_tags_drops_blank_and_duplicate_entries() {
    let tags = normalize_tags(["  ", "Rust", "rust", "CLI", "", "cli", "web "]);
    assert_eq!(tags, vec!["Rust", "CLI", "web"]);
}

#[test]
fn status_parses_case_insensitively_and_serializes_lowercase() {
    assert_eq!("Draft".parse::<BlogStatus>(), Ok(BlogStatus::Draft));
    assert_eq!(" published ".parse::<BlogStatus>(), Ok(BlogStatus::Published));
    assert!("archived".parse::<BlogStatus>().is_err());
    assert_eq!(
        serde_json::to_string(&BlogStatus::Published).expect("encode"),
        "\"published\""
    );
}
