//! Data models for persistence and the HTTP API.

/// Draft and published post records plus request payloads.
pub mod blog;

#[cfg(test)]
mod tests;
