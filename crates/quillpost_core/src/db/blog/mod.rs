//! Draft and published post storage backed by redb.
//!
//! Drafts and published posts live on separate shelves (row table plus
//! recency index) so a published post can be re-edited under its own id
//! while the live row stays untouched. Every write is a whole-row upsert,
//! so the last committed write wins.

mod helpers;

use crate::{db::tables::*, error::AppError, models::blog::*};
use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::sync::Arc;

use self::helpers::{deserialize_blog, next_updated_at, reverse_timestamp_key, serialize_blog};

type RowTable = TableDefinition<'static, &'static str, &'static [u8]>;
type IndexTable = TableDefinition<'static, (u64, &'static str), ()>;

#[derive(Clone, Copy)]
struct Shelf {
    rows: RowTable,
    by_updated: IndexTable,
}

const DRAFT_SHELF: Shelf = Shelf {
    rows: DRAFTS,
    by_updated: DRAFTS_BY_UPDATED,
};

const POST_SHELF: Shelf = Shelf {
    rows: POSTS,
    by_updated: POSTS_BY_UPDATED,
};

fn shelf_for(status: BlogStatus) -> Shelf {
    match status {
        BlogStatus::Draft => DRAFT_SHELF,
        BlogStatus::Published => POST_SHELF,
    }
}

fn write_row(
    rows: &mut redb::Table<&str, &[u8]>,
    index: &mut redb::Table<(u64, &str), ()>,
    previous_key: Option<u64>,
    blog: &Blog,
) -> Result<(), AppError> {
    let encoded = serialize_blog(blog)?;
    let new_key = reverse_timestamp_key(blog.updated_at);
    if let Some(previous_key) = previous_key {
        if previous_key != new_key {
            let _ = index.remove((previous_key, blog.id.as_str()))?;
        }
    }
    rows.insert(blog.id.as_str(), encoded.as_slice())?;
    index.insert((new_key, blog.id.as_str()), ())?;
    Ok(())
}

fn remove_row(
    rows: &mut redb::Table<&str, &[u8]>,
    index: &mut redb::Table<(u64, &str), ()>,
    id: &str,
) -> Result<bool, AppError> {
    let blog = match rows.get(id)? {
        Some(guard) => deserialize_blog(guard.value())?,
        None => return Ok(false),
    };
    let _ = index.remove((reverse_timestamp_key(blog.updated_at), id))?;
    let _ = rows.remove(id)?;
    Ok(true)
}

fn require_id(id: &str, what: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} id must not be empty", what)));
    }
    Ok(())
}

/// Accessor for draft and post tables.
pub struct BlogDb {
    db: Arc<redb::Database>,
}

impl BlogDb {
    /// Initialize blog tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        for shelf in [DRAFT_SHELF, POST_SHELF] {
            write_txn.open_table(shelf.rows)?;
            write_txn.open_table(shelf.by_updated)?;
        }
        write_txn.commit()?;
        Ok(Self { db })
    }

    fn upsert<F>(&self, shelf: Shelf, id: &str, build: F) -> Result<Blog, AppError>
    where
        F: FnOnce(Option<Blog>) -> Blog,
    {
        let write_txn = self.db.begin_write()?;
        let stored = {
            let mut rows = write_txn.open_table(shelf.rows)?;
            let mut index = write_txn.open_table(shelf.by_updated)?;

            let existing = match rows.get(id)? {
                Some(guard) => Some(deserialize_blog(guard.value())?),
                None => None,
            };
            let previous_key = existing
                .as_ref()
                .map(|current| reverse_timestamp_key(current.updated_at));
            let blog = build(existing);

            write_row(&mut rows, &mut index, previous_key, &blog)?;
            blog
        };
        write_txn.commit()?;
        Ok(stored)
    }

    /// Upsert a draft snapshot under `id`.
    ///
    /// An existing draft keeps its `created_at`; every other field is replaced
    /// by the snapshot and `updated_at` advances.
    ///
    /// # Returns
    /// The stored draft row.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for an empty id, or storage errors.
    pub fn save_draft(&self, id: &str, req: SaveDraftRequest) -> Result<Blog, AppError> {
        let id = id.trim();
        require_id(id, "Draft")?;
        self.upsert(DRAFT_SHELF, id, |existing| match existing {
            Some(mut current) => {
                current.title = req.title;
                current.content = req.content;
                current.tags = normalize_tags(req.tags);
                current.author_id = req.author_id;
                current.author_name = req.author_name;
                current.updated_at = next_updated_at(Some(current.updated_at));
                current
            }
            None => Blog::new_draft(id.to_string(), req),
        })
    }

    /// Create or overwrite a published post.
    ///
    /// Republishing an existing post keeps its `views` and `created_at`.
    ///
    /// # Errors
    /// Returns [`AppError::BadRequest`] for an empty id, or storage errors.
    pub fn publish(&self, mut req: PublishRequest) -> Result<Blog, AppError> {
        req.id = req.id.trim().to_string();
        require_id(&req.id, "Post")?;
        let id = req.id.clone();
        self.upsert(POST_SHELF, &id, |existing| {
            let mut blog = Blog::new_published(req);
            if let Some(current) = existing {
                blog.created_at = current.created_at;
                blog.views = current.views;
                blog.updated_at = next_updated_at(Some(current.updated_at));
            }
            blog
        })
    }

    fn get_in(&self, shelf: Shelf, id: &str) -> Result<Option<Blog>, AppError> {
        let read_txn = self.db.begin_read()?;
        let rows = read_txn.open_table(shelf.rows)?;
        match rows.get(id.trim())? {
            Some(value) => Ok(Some(deserialize_blog(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch a published post by id.
    pub fn get_post(&self, id: &str) -> Result<Option<Blog>, AppError> {
        self.get_in(POST_SHELF, id)
    }

    /// Fetch a draft by id.
    pub fn get_draft(&self, id: &str) -> Result<Option<Blog>, AppError> {
        self.get_in(DRAFT_SHELF, id)
    }

    /// Fetch by id, preferring the published post when both shelves hold one.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn get(&self, id: &str) -> Result<Option<Blog>, AppError> {
        match self.get_post(id)? {
            Some(post) => Ok(Some(post)),
            None => self.get_draft(id),
        }
    }

    /// Delete the draft stored under `id`. Published posts are never touched.
    ///
    /// # Returns
    /// `true` when a draft row was removed, `false` when none existed.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn delete_draft(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut rows = write_txn.open_table(DRAFTS)?;
            let mut index = write_txn.open_table(DRAFTS_BY_UPDATED)?;
            remove_row(&mut rows, &mut index, id.trim())?
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Delete several ids from both shelves in one transaction.
    ///
    /// Missing ids are skipped.
    ///
    /// # Returns
    /// Number of rows removed (an id present as draft and post counts twice).
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn bulk_delete(&self, ids: &[String]) -> Result<usize, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let write_txn = self.db.begin_write()?;
        let mut removed = 0usize;
        for shelf in [DRAFT_SHELF, POST_SHELF] {
            let mut rows = write_txn.open_table(shelf.rows)?;
            let mut index = write_txn.open_table(shelf.by_updated)?;
            for id in ids {
                if remove_row(&mut rows, &mut index, id.trim())? {
                    removed += 1;
                }
            }
        }
        write_txn.commit()?;
        Ok(removed)
    }

    fn list_shelf(&self, shelf: Shelf, author_id: &str) -> Result<Vec<Blog>, AppError> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(shelf.by_updated)?;
        let rows = read_txn.open_table(shelf.rows)?;
        let mut blogs = Vec::new();

        for item in index.iter()? {
            let (key, _) = item?;
            let (_, blog_id) = key.value();
            let Some(guard) = rows.get(blog_id)? else {
                continue;
            };
            let blog = deserialize_blog(guard.value())?;
            if blog.author_id == author_id {
                blogs.push(blog);
            }
        }

        Ok(blogs)
    }

    /// List an author's rows sorted by `updated_at` descending.
    ///
    /// # Arguments
    /// - `author_id`: Owner to filter on.
    /// - `status`: Draft or published shelf; `None` merges both.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_for_author(
        &self,
        author_id: &str,
        status: Option<BlogStatus>,
    ) -> Result<Vec<Blog>, AppError> {
        if let Some(status) = status {
            return self.list_shelf(shelf_for(status), author_id);
        }
        let mut merged = self.list_shelf(POST_SHELF, author_id)?;
        merged.extend(self.list_shelf(DRAFT_SHELF, author_id)?);
        merged.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
        Ok(merged)
    }

    /// Increment the view counter of a published post.
    ///
    /// Views do not count as edits, so `updated_at` and the recency index are
    /// left alone.
    ///
    /// # Returns
    /// `Ok(Some(views))` with the new count, `Ok(None)` when no post has `id`.
    ///
    /// # Errors
    /// Returns an error when storage access or serialization fails.
    pub fn increment_views(&self, id: &str) -> Result<Option<u64>, AppError> {
        let id = id.trim();
        let write_txn = self.db.begin_write()?;
        let views = {
            let mut rows = write_txn.open_table(POSTS)?;
            let Some(guard) = rows.get(id)? else {
                return Ok(None);
            };
            let mut blog = deserialize_blog(guard.value())?;
            drop(guard);
            blog.views = blog.views.saturating_add(1);
            let encoded = serialize_blog(&blog)?;
            rows.insert(id, encoded.as_slice())?;
            blog.views
        };
        write_txn.commit()?;
        Ok(Some(views))
    }
}

#[cfg(test)]
mod tests;
