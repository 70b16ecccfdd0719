//! Encoding and index helpers shared by blog storage operations.

use crate::error::AppError;
use crate::models::blog::Blog;
use chrono::{DateTime, Utc};

pub(crate) fn reverse_timestamp_key(updated_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps clamp to zero instead of wrapping.
    let millis = updated_at.timestamp_millis().max(0) as u64;
    u64::MAX.saturating_sub(millis)
}

pub(crate) fn deserialize_blog(bytes: &[u8]) -> Result<Blog, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn serialize_blog(blog: &Blog) -> Result<Vec<u8>, AppError> {
    Ok(bincode::serialize(blog)?)
}

/// Next `updated_at` for a row, never earlier than the previous write so the
/// recency index stays stable under clock skew.
pub(super) fn next_updated_at(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if previous > now => previous,
        _ => now,
    }
}
