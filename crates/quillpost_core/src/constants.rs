//! Shared constants used across QuillPost crates.

/// Default API port for the QuillPost server.
pub const DEFAULT_PORT: u16 = 38420;

/// Default maximum post content size accepted by the API layer.
pub const DEFAULT_MAX_POST_SIZE: usize = 5 * 1024 * 1024;

/// Default periodic autosave interval in milliseconds.
pub const DEFAULT_AUTO_SAVE_INTERVAL_MS: u64 = 30_000;

/// Default quiet window before a title edit is saved.
pub const DEFAULT_TITLE_SAVE_DEBOUNCE_MS: u64 = 1_000;

/// Default quiet window before a content or tag edit is saved.
pub const DEFAULT_CONTENT_SAVE_DEBOUNCE_MS: u64 = 2_000;

/// Default base URL for CLI/API clients.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:38420";

/// Author id used when no identity is available.
pub const ANONYMOUS_AUTHOR_ID: &str = "user-1";
/// Author display name used when no identity is available.
pub const ANONYMOUS_AUTHOR_NAME: &str = "Anonymous";
