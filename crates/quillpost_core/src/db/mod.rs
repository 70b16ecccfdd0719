//! Database layer for QuillPost drafts and published posts.

/// Draft and post storage helpers.
pub mod blog;
/// redb table definitions.
pub mod tables;

use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// Database handle with access to the blog tables.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub blogs: blog::BlogDb,
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if the required tables cannot be created.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            blogs: blog::BlogDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another subsystem in the same process without
    /// reopening the file (redb holds an exclusive file lock).
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database under the `path` directory.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or table initialization fails.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory '{}': {}",
                dir.display(),
                err
            ))
        })?;
        let file = dir.join(tables::REDB_FILE_NAME);
        let db = match redb::Database::create(&file) {
            Ok(db) => db,
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database '{}' is already open in another process",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened blog store at {}", file.display());
        Self::from_shared(Arc::new(db))
    }
}

#[cfg(test)]
mod tests;
