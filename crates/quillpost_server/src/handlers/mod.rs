//! HTTP request handlers.

/// Draft and post endpoints.
pub mod blog;
