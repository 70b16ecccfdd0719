//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "quillpost.redb";

/// Draft rows (`Blog`, bincode-encoded), keyed by draft id.
pub const DRAFTS: TableDefinition<&str, &[u8]> = TableDefinition::new("drafts");
/// Draft recency index ordered by reverse-millis then id.
pub const DRAFTS_BY_UPDATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("drafts_by_updated");

/// Published post rows (`Blog`, bincode-encoded), keyed by post id.
pub const POSTS: TableDefinition<&str, &[u8]> = TableDefinition::new("posts");
/// Post recency index ordered by reverse-millis then id.
pub const POSTS_BY_UPDATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("posts_by_updated");
