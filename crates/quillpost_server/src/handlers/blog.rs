//! Draft and post HTTP handlers.

use crate::{error::HttpError, models::blog::*, AppError, AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

fn ensure_content_fits(state: &AppState, content: &str) -> Result<(), AppError> {
    if content.len() > state.config.max_post_size {
        return Err(AppError::BadRequest(format!(
            "Post size exceeds maximum of {} bytes",
            state.config.max_post_size
        )));
    }
    Ok(())
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Upsert a draft snapshot.
///
/// # Returns
/// The stored draft as JSON.
///
/// # Errors
/// Returns 400 for oversized content or a missing author, 500 on storage failure.
pub async fn save_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut req): Json<SaveDraftRequest>,
) -> Result<Json<Blog>, HttpError> {
    ensure_content_fits(&state, &req.content)?;
    req.author_id = required(&req.author_id, "author_id")?;
    let draft = state.db.blogs.save_draft(&id, req)?;
    Ok(Json(draft))
}

/// Delete a draft. Published posts are never removed by this route.
///
/// # Returns
/// `204 No Content` when a draft was removed.
///
/// # Errors
/// Returns 404 when no draft has `id`.
pub async fn delete_draft(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HttpError> {
    if state.db.blogs.delete_draft(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound.into())
    }
}

/// Create or overwrite a published post.
///
/// # Returns
/// The stored post as JSON.
///
/// # Errors
/// Returns 400 for a blank id, title, author or content, or oversized content.
pub async fn publish_blog(
    State(state): State<AppState>,
    Json(mut req): Json<PublishRequest>,
) -> Result<Json<Blog>, HttpError> {
    ensure_content_fits(&state, &req.content)?;
    req.id = required(&req.id, "id")?;
    req.title = required(&req.title, "title")?;
    req.author_id = required(&req.author_id, "author_id")?;
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest("content is required".to_string()).into());
    }
    let post = state.db.blogs.publish(req)?;
    tracing::info!("Published post {}", post.id);
    Ok(Json(post))
}

/// List an author's posts, newest first.
///
/// # Errors
/// Returns 400 when `author_id` is blank.
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Blog>>, HttpError> {
    let author_id = required(&query.author_id, "author_id")?;
    let blogs = state.db.blogs.list_for_author(&author_id, query.status)?;
    Ok(Json(blogs))
}

/// Fetch one post, preferring the published row over a pending draft.
///
/// # Errors
/// Returns 404 when neither exists.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Blog>, HttpError> {
    state
        .db
        .blogs
        .get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound.into())
}

/// Count one view of a published post.
///
/// # Errors
/// Returns 404 when no published post has `id`.
pub async fn increment_views(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewsResponse>, HttpError> {
    match state.db.blogs.increment_views(&id)? {
        Some(views) => Ok(Json(ViewsResponse { id, views })),
        None => Err(AppError::NotFound.into()),
    }
}

/// Delete several drafts and posts at once.
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, HttpError> {
    let deleted = state.db.blogs.bulk_delete(&req.ids)?;
    if deleted > 0 {
        tracing::info!("Bulk delete removed {} row(s)", deleted);
    }
    Ok(Json(BulkDeleteResponse { deleted }))
}
