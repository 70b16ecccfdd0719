//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_CONTENT_SAVE_DEBOUNCE_MS, DEFAULT_MAX_POST_SIZE,
    DEFAULT_PORT, DEFAULT_TITLE_SAVE_DEBOUNCE_MS,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for QuillPost.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_post_size: usize,
    /// Periodic fallback save interval in milliseconds.
    pub auto_save_interval: u64,
    /// Quiet window for title edits in milliseconds.
    pub title_save_debounce: u64,
    /// Quiet window for content and tag edits in milliseconds.
    pub content_save_debounce: u64,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Read a boolean flag from the environment.
///
/// Missing or unrecognized values are treated as `false`.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|raw| raw.trim().parse().ok())
}

/// Read a millisecond interval, rejecting zero so timers never spin.
fn env_millis(name: &str, default: u64) -> u64 {
    match env_parsed::<u64>(name) {
        Some(0) => {
            tracing::warn!("{}=0 is not a usable interval; using {} ms", name, default);
            default
        }
        Some(value) => value,
        None => default,
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("quillpost");
                cache_dir.join("db").to_string_lossy().to_string()
            }),
            port: env_parsed("PORT").unwrap_or(DEFAULT_PORT),
            max_post_size: env_parsed("MAX_POST_SIZE").unwrap_or(DEFAULT_MAX_POST_SIZE),
            auto_save_interval: env_millis("AUTO_SAVE_INTERVAL", DEFAULT_AUTO_SAVE_INTERVAL_MS),
            title_save_debounce: env_millis(
                "TITLE_SAVE_DEBOUNCE_MS",
                DEFAULT_TITLE_SAVE_DEBOUNCE_MS,
            ),
            content_save_debounce: env_millis(
                "CONTENT_SAVE_DEBOUNCE_MS",
                DEFAULT_CONTENT_SAVE_DEBOUNCE_MS,
            ),
        }
    }

    /// Period of the fallback autosave timer.
    pub fn auto_save_period(&self) -> Duration {
        Duration::from_millis(self.auto_save_interval)
    }

    /// Debounce window for title edits.
    pub fn title_debounce(&self) -> Duration {
        Duration::from_millis(self.title_save_debounce)
    }

    /// Debounce window for content and tag edits.
    pub fn content_debounce(&self) -> Duration {
        Duration::from_millis(self.content_save_debounce)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: String::from("quillpost-db"),
            port: DEFAULT_PORT,
            max_post_size: DEFAULT_MAX_POST_SIZE,
            auto_save_interval: DEFAULT_AUTO_SAVE_INTERVAL_MS,
            title_save_debounce: DEFAULT_TITLE_SAVE_DEBOUNCE_MS,
            content_save_debounce: DEFAULT_CONTENT_SAVE_DEBOUNCE_MS,
        }
    }
}
