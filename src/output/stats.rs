//! Statistics generation from the ingest database
//!
//! This module extracts and displays summary figures from the storage layer:
//! the total posting count and the most recent run-log rows.

use crate::storage::{JobStore, RunLogRecord, StorageResult};

/// How many run-log rows the summary shows
const RECENT_RUN_LIMIT: u32 = 10;

/// Ingest statistics summary
#[derive(Debug, Clone)]
pub struct IngestStatistics {
    /// Total persisted job postings
    pub total_jobs: u64,

    /// Most recent runs, newest first
    pub recent_runs: Vec<RunLogRecord>,
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `store` - The storage backend to query
///
/// # Returns
///
/// * `Ok(IngestStatistics)` - Successfully loaded statistics
/// * `Err(StorageError)` - Failed to query statistics
pub fn load_statistics(store: &dyn JobStore) -> StorageResult<IngestStatistics> {
    let total_jobs = store.count_jobs()?;
    let recent_runs = store.recent_runs(RECENT_RUN_LIMIT)?;

    Ok(IngestStatistics {
        total_jobs,
        recent_runs,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &IngestStatistics) {
    println!("=== Ingest Statistics ===\n");
    println!("Total job postings: {}", stats.total_jobs);
    println!();

    if stats.recent_runs.is_empty() {
        println!("No runs recorded yet.");
        return;
    }

    println!("Recent runs (newest first):");
    for run in &stats.recent_runs {
        println!(
            "  [{}] {} ({}) - found {}, new {}, updated {}, skipped {}, errors {} - {}",
            run.started_at,
            run.site_name,
            run.scrape_mode,
            run.jobs_found,
            run.jobs_new,
            run.jobs_updated,
            run.jobs_skipped,
            run.errors,
            run.status.to_db_string()
        );
    }
}
