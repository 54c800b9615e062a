//! Near-duplicate detection
//!
//! The primary dedup key is the exact source URL, checked against the store.
//! This module provides the secondary, advisory signal: two records from
//! possibly different sites that describe the same underlying job. The signal
//! is logged for downstream reconciliation and never blocks insertion.

use crate::model::JobPosting;
use strsim::normalized_levenshtein;

/// Similarity threshold on both title and company for the fuzzy match
const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Judges whether two records describe the same underlying job
///
/// True when titles and companies match exactly after case/whitespace
/// normalization, or when both similarity ratios exceed 0.9.
pub fn same_underlying_job(a: &JobPosting, b: &JobPosting) -> bool {
    let title_a = fold(&a.title);
    let title_b = fold(&b.title);
    let company_a = fold(&a.company);
    let company_b = fold(&b.company);

    if title_a == title_b && company_a == company_b {
        return true;
    }

    normalized_levenshtein(&title_a, &title_b) > SIMILARITY_THRESHOLD
        && normalized_levenshtein(&company_a, &company_b) > SIMILARITY_THRESHOLD
}

fn fold(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
