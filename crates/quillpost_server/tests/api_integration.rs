//! Integration tests for the QuillPost HTTP API.

mod support;

use axum::http::StatusCode;
use quillpost_server::models::blog::{Blog, BlogStatus, BulkDeleteResponse, ViewsResponse};
use serde_json::json;
use support::setup_test_server;

fn draft_body(title: &str, content: &str) -> serde_json::Value {
    json!({
        "title": title,
        "content": content,
        "tags": ["Rust", "rust", " notes "],
        "author_id": "u-1",
        "author_name": "Ada"
    })
}

fn publish_body(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "content": "<p>published</p>",
        "author_id": "u-1",
        "author_name": "Ada"
    })
}

#[tokio::test]
async fn draft_lifecycle_upserts_then_deletes() {
    let (server, _temp) = setup_test_server();

    let first = server
        .put("/api/drafts/draft-1")
        .json(&draft_body("First", "<p>one</p>"))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let first: Blog = first.json();
    assert_eq!(first.status, BlogStatus::Draft);
    assert_eq!(first.tags, vec!["Rust", "notes"]);

    let second = server
        .put("/api/drafts/draft-1")
        .json(&draft_body("Second", "<p>two</p>"))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);
    let second: Blog = second.json();
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);

    let fetched: Blog = server.get("/api/blogs/draft-1").await.json();
    assert_eq!(fetched.title, "Second");

    let deleted = server.delete("/api/drafts/draft-1").await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    let missing = server.get("/api/blogs/draft-1").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    let missing: serde_json::Value = missing.json();
    assert_eq!(missing["error"], "Not found");

    let deleted_again = server.delete("/api/drafts/draft-1").await;
    assert_eq!(deleted_again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn save_draft_rejects_oversized_content_and_missing_author() {
    let (server, _temp) = setup_test_server();

    let oversized = server
        .put("/api/drafts/big")
        .json(&draft_body("Big", &"x".repeat(64 * 1024 + 1)))
        .await;
    assert!(oversized.status_code().is_client_error());

    let anonymous = server
        .put("/api/drafts/nobody")
        .json(&json!({
            "title": "t",
            "content": "<p>c</p>",
            "author_id": "  ",
            "author_name": "Ghost"
        }))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = anonymous.json();
    assert_eq!(body["error"], "author_id is required");
}

#[tokio::test]
async fn publish_validates_and_counts_views() {
    let (server, _temp) = setup_test_server();

    let untitled = server
        .post("/api/blogs/publish")
        .json(&publish_body("blog-1", "   "))
        .await;
    assert_eq!(untitled.status_code(), StatusCode::BAD_REQUEST);

    let published = server
        .post("/api/blogs/publish")
        .json(&publish_body("blog-1", " Launch "))
        .await;
    assert_eq!(published.status_code(), StatusCode::OK);
    let post: Blog = published.json();
    assert_eq!(post.status, BlogStatus::Published);
    assert_eq!(post.title, "Launch");
    assert_eq!(post.views, 0);

    for expected in 1..=2 {
        let views: ViewsResponse = server.post("/api/blogs/blog-1/views").await.json();
        assert_eq!(views.views, expected);
    }

    server
        .put("/api/drafts/draft-only")
        .json(&draft_body("Draft", "<p>d</p>"))
        .await;
    let draft_views = server.post("/api/blogs/draft-only/views").await;
    assert_eq!(draft_views.status_code(), StatusCode::NOT_FOUND);

    let republished: Blog = server
        .post("/api/blogs/publish")
        .json(&publish_body("blog-1", "Launch v2"))
        .await
        .json();
    assert_eq!(republished.views, 2);
    assert_eq!(republished.created_at, post.created_at);
}

#[tokio::test]
async fn list_filters_by_author_and_status() {
    let (server, _temp) = setup_test_server();

    server
        .put("/api/drafts/d-1")
        .json(&draft_body("Draft", "<p>d</p>"))
        .await;
    server
        .post("/api/blogs/publish")
        .json(&publish_body("p-1", "Post"))
        .await;
    server
        .put("/api/drafts/other")
        .json(&json!({
            "title": "Theirs",
            "content": "<p>x</p>",
            "author_id": "u-2",
            "author_name": "Bo"
        }))
        .await;

    let all: Vec<Blog> = server.get("/api/blogs?author_id=u-1").await.json();
    let ids: Vec<&str> = all.iter().map(|blog| blog.id.as_str()).collect();
    assert_eq!(ids, vec!["p-1", "d-1"]);

    let drafts: Vec<Blog> = server
        .get("/api/blogs?author_id=u-1&status=draft")
        .await
        .json();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, "d-1");

    let published: Vec<Blog> = server
        .get("/api/blogs?author_id=u-1&status=published")
        .await
        .json();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, "p-1");

    let blank_author = server.get("/api/blogs?author_id=%20").await;
    assert_eq!(blank_author.status_code(), StatusCode::BAD_REQUEST);
    let bad_status = server.get("/api/blogs?author_id=u-1&status=archived").await;
    assert_eq!(bad_status.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_delete_removes_drafts_and_posts() {
    let (server, _temp) = setup_test_server();

    server
        .put("/api/drafts/d-1")
        .json(&draft_body("Draft", "<p>d</p>"))
        .await;
    server
        .post("/api/blogs/publish")
        .json(&publish_body("p-1", "Post"))
        .await;

    let response = server
        .post("/api/blogs/bulk-delete")
        .json(&json!({ "ids": ["d-1", "p-1", "missing"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let response: BulkDeleteResponse = response.json();
    assert_eq!(response.deleted, 2);

    let remaining: Vec<Blog> = server.get("/api/blogs?author_id=u-1").await.json();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let (server, _temp) = setup_test_server();
    let response = server.get("/api/blogs?author_id=u-1").await;
    response.assert_header("x-content-type-options", "nosniff");
    response.assert_header("x-frame-options", "DENY");
    response.assert_contains_header("content-security-policy");
}
