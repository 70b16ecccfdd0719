//! Core domain library for QuillPost (config, storage, models).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across QuillPost crates.
pub mod constants;
/// Database access layer backed by redb.
pub mod db;
/// Environment mutation helpers shared by tests.
pub mod env;
/// Application error types (storage/domain).
pub mod error;
/// Data models for API requests and persistence.
pub mod models;
/// Draft and post identifier minting.
pub mod naming;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use constants::{
    DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_CONTENT_SAVE_DEBOUNCE_MS, DEFAULT_MAX_POST_SIZE,
    DEFAULT_PORT, DEFAULT_TITLE_SAVE_DEBOUNCE_MS,
};
pub use db::Database;
pub use error::AppError;
