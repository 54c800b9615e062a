//! Incremental early stopping
//!
//! In incremental mode the run halts once the stream of detail URLs is
//! clearly dominated by already-known postings: either a long consecutive
//! streak of duplicates, or a high overall duplicate density once enough
//! URLs have been checked. Full refresh never stops early.

use crate::model::ScrapeMode;

/// Consecutive known URLs that end an incremental run
const CONSECUTIVE_LIMIT: u32 = 20;

/// URLs that must be checked before the density rule can trigger
const DENSITY_MIN_CHECKED: u64 = 50;

/// Duplicate density at or above which the run ends
const DENSITY_LIMIT: f64 = 0.8;

/// Tracks duplicate pressure over the detail-URL stream of one run
#[derive(Debug)]
pub struct IncrementalController {
    enabled: bool,
    consecutive_duplicates: u32,
    total_checked: u64,
    skipped: u64,
}

impl IncrementalController {
    pub fn new(mode: ScrapeMode) -> Self {
        Self {
            enabled: mode == ScrapeMode::Incremental,
            consecutive_duplicates: 0,
            total_checked: 0,
            skipped: 0,
        }
    }

    /// Records a URL already present in the store
    pub fn record_skip(&mut self) {
        self.total_checked += 1;
        self.skipped += 1;
        self.consecutive_duplicates += 1;
    }

    /// Records a URL not seen before; resets the duplicate streak
    pub fn record_fresh(&mut self) {
        self.total_checked += 1;
        self.consecutive_duplicates = 0;
    }

    /// Whether the run should halt before the next URL
    pub fn should_stop(&self) -> bool {
        if !self.enabled {
            return false;
        }

        if self.consecutive_duplicates >= CONSECUTIVE_LIMIT {
            return true;
        }

        self.total_checked >= DENSITY_MIN_CHECKED
            && self.skipped as f64 / self.total_checked as f64 >= DENSITY_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_streak_stops() {
        let mut controller = IncrementalController::new(ScrapeMode::Incremental);
        for _ in 0..19 {
            controller.record_skip();
        }
        assert!(!controller.should_stop());
        controller.record_skip();
        assert!(controller.should_stop());
    }

    #[test]
    fn test_fresh_url_resets_streak() {
        let mut controller = IncrementalController::new(ScrapeMode::Incremental);
        for _ in 0..19 {
            controller.record_skip();
        }
        controller.record_fresh();
        controller.record_skip();
        assert!(!controller.should_stop());
    }

    #[test]
    fn test_density_rule_needs_enough_checks() {
        let mut controller = IncrementalController::new(ScrapeMode::Incremental);

        // 16 skips, 4 fresh, interleaved to keep the streak short: 80%
        // density but only 20 checked
        for _ in 0..4 {
            for _ in 0..4 {
                controller.record_skip();
            }
            controller.record_fresh();
        }
        assert!(!controller.should_stop());

        // Same pattern continued out to 50 checked
        for _ in 0..6 {
            for _ in 0..4 {
                controller.record_skip();
            }
            controller.record_fresh();
        }
        assert!(controller.should_stop());
    }

    #[test]
    fn test_below_density_keeps_going() {
        let mut controller = IncrementalController::new(ScrapeMode::Incremental);

        // Alternating skip/fresh: 50% density, never a long streak
        for _ in 0..40 {
            controller.record_skip();
            controller.record_fresh();
        }
        assert!(!controller.should_stop());
    }

    #[test]
    fn test_disabled_in_full_refresh() {
        let mut controller = IncrementalController::new(ScrapeMode::FullRefresh);
        for _ in 0..200 {
            controller.record_skip();
        }
        assert!(!controller.should_stop());
    }
}
