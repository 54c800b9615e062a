//! Record validation
//!
//! Enforces schema and business invariants on normalized records before they
//! reach the store. Failures are counted as errors by the pipeline and the
//! record is discarded, never retried.

use crate::model::JobPosting;
use thiserror::Error;

/// Placeholder strings that listing sites use for section headings; never
/// valid job titles.
pub const TITLE_BLACKLIST: &[&str] = &[
    "Recommended Jobs",
    "Similar Jobs",
    "Jobs",
    "Related Jobs",
    "Popular Jobs",
    "All Jobs",
];

/// Reasons a normalized record can be rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("placeholder title rejected: {0}")]
    BlacklistedTitle(String),

    #[error("salary_min {min} exceeds salary_max {max}")]
    InvertedSalary { min: u64, max: u64 },

    #[error("URL scheme must be http or https: {0}")]
    BadUrlScheme(String),
}

/// Checks whether a title is a known non-job placeholder
pub fn is_blacklisted_title(title: &str) -> bool {
    TITLE_BLACKLIST
        .iter()
        .any(|t| t.eq_ignore_ascii_case(title.trim()))
}

/// Validates a normalized record
///
/// Required fields must be non-empty, the title must not be a placeholder,
/// the salary range must be ordered (re-checked even though normalization
/// already guarantees it), and the URL scheme must be http or https.
pub fn validate_job(job: &JobPosting) -> Result<(), ValidationError> {
    if job.site_source.trim().is_empty() {
        return Err(ValidationError::MissingField("site_source"));
    }
    if job.source_url.trim().is_empty() {
        return Err(ValidationError::MissingField("source_url"));
    }
    if job.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    if job.company.trim().is_empty() {
        return Err(ValidationError::MissingField("company"));
    }

    if is_blacklisted_title(&job.title) {
        return Err(ValidationError::BlacklistedTitle(job.title.clone()));
    }

    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        if min > max {
            return Err(ValidationError::InvertedSalary { min, max });
        }
    }

    if !job.source_url.starts_with("http://") && !job.source_url.starts_with("https://") {
        return Err(ValidationError::BadUrlScheme(job.source_url.clone()));
    }

    Ok(())
}
