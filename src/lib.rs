//! Root crate facade for QuillPost: storage, the editor session runtime, and
//! the HTTP server.

pub use quillpost_core::{config, db, models, naming, AppError, Config, Database, DEFAULT_PORT};
pub use quillpost_editor as editor;
pub use quillpost_editor::{
    BlogBackend, Coordinator, DraftEditor, EditorEvent, EditorOptions, HttpBackend, LocalBackend,
    PublishError, PublishReceipt, SaveOutcome,
};
pub use quillpost_server::{create_app, resolve_bind_address, serve_router, AppState};
