//! Run-level accounting
//!
//! Every pipeline stage reports into a `RunStats` value owned by the
//! orchestrating caller; the terminal status is derived from the counters at
//! the end of the run.

use chrono::{DateTime, Utc};

/// Terminal classification of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No errors at all
    Success,

    /// Errors occurred but at least one new record was ingested
    Partial,

    /// Errors occurred and nothing new was ingested
    Failed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Partial => "partial",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "partial" => Some(Self::Partial),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// Counters for one pipeline run
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Detail URLs considered
    pub found: u64,

    /// Records inserted for the first time
    pub new: u64,

    /// Existing records refreshed in place
    pub updated: u64,

    /// URLs already known to the store
    pub skipped: u64,

    /// Fetch, extraction, validation, or persistence failures
    pub errors: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunStats {
    pub fn start() -> Self {
        Self {
            found: 0,
            new: 0,
            updated: 0,
            skipped: 0,
            errors: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Marks the run finished; idempotent
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Derives the terminal status from the counters
    pub fn status(&self) -> RunStatus {
        if self.errors == 0 {
            RunStatus::Success
        } else if self.new > 0 {
            RunStatus::Partial
        } else {
            RunStatus::Failed
        }
    }

    /// Folds another stats value into this one (used when running "all" sites,
    /// where each site produces its own stats)
    pub fn merge(&mut self, other: &RunStats) {
        self.found += other.found;
        self.new += other.new;
        self.updated += other.updated;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::start()
    }
}
