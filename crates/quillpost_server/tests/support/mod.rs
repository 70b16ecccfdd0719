//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use quillpost_server::{create_app, AppState, Config, Database};
use std::path::Path;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_post_size: 64 * 1024,
        auto_save_interval: 30_000,
        title_save_debounce: 1_000,
        content_save_debounce: 2_000,
    }
}

pub(crate) fn test_state(temp_dir: &TempDir) -> AppState {
    let config = test_config_for_db_path(&temp_dir.path().join("db"));
    let db = Database::new(config.db_path.as_str()).expect("open db");
    AppState::new(config, db)
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let app = create_app(test_state(&temp_dir), false);
    let server = TestServer::new(app).expect("server");
    (server, temp_dir)
}
