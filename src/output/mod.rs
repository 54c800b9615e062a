//! Reporting surfaces
//!
//! Reads back the persisted run log and job counts for the `--stats` command.

mod stats;

pub use stats::{load_statistics, print_statistics, IngestStatistics};
