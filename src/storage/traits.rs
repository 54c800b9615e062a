//! Storage traits and error types

use crate::model::{JobPosting, ScrapeMode};
use crate::stats::{RunStats, RunStatus};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One row of the run log, as read back for reporting
#[derive(Debug, Clone)]
pub struct RunLogRecord {
    pub site_name: String,
    pub scrape_mode: String,
    pub started_at: String,
    pub completed_at: String,
    pub jobs_found: u64,
    pub jobs_new: u64,
    pub jobs_updated: u64,
    pub jobs_skipped: u64,
    pub errors: u64,
    pub status: RunStatus,
}

/// Persistence gateway for the scraping pipeline
///
/// The store is the single source of truth for "already known": the identity
/// key is the record's source URL.
pub trait JobStore {
    /// Checks whether a posting with this source URL is already persisted
    fn exists(&self, source_url: &str) -> StorageResult<bool>;

    /// Inserts a new posting
    ///
    /// Returns false (not an error) when the identity URL already exists.
    fn insert(&mut self, job: &JobPosting) -> StorageResult<bool>;

    /// Updates an existing posting in place
    ///
    /// Returns false when no row with this source URL exists. The identity
    /// URL itself is never changed.
    fn update(&mut self, source_url: &str, job: &JobPosting) -> StorageResult<bool>;

    /// Reads a posting back by its source URL
    fn get_by_url(&self, source_url: &str) -> StorageResult<Option<JobPosting>>;

    /// Total persisted postings
    fn count_jobs(&self) -> StorageResult<u64>;

    /// Appends one run's accounting to the run log
    ///
    /// Called unconditionally at run end, even for failed runs.
    fn record_run(
        &mut self,
        site: &str,
        mode: ScrapeMode,
        stats: &RunStats,
    ) -> StorageResult<()>;

    /// Most recent run-log rows, newest first
    fn recent_runs(&self, limit: u32) -> StorageResult<Vec<RunLogRecord>>;
}
