//! Persistence layer
//!
//! SQLite-backed storage for job postings and the per-run accounting log.
//! The pipeline talks to storage only through the `JobStore` trait so tests
//! can substitute an in-memory database.

pub mod schema;
pub mod sqlite;
pub mod traits;

pub use schema::initialize_schema;
pub use sqlite::SqliteStore;
pub use traits::{JobStore, RunLogRecord, StorageError, StorageResult};

use std::path::Path;

/// Opens the store at the configured database path
///
/// # Arguments
/// * `path` - Filesystem path to the SQLite database file
///
/// # Returns
/// A ready-to-use store with the schema initialized
pub fn open_store(path: &Path) -> StorageResult<SqliteStore> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    SqliteStore::new(path)
}
