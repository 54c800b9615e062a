//! JobScout: a bounded-budget job posting ingester
//!
//! This crate implements a scraping pipeline for job listing sites that expose
//! no API: listing pages are paginated through per-tier budgets, detail pages
//! are extracted through a layered fallback chain, and the results are
//! normalized, validated, and deduplicated against previously seen postings.

pub mod config;
pub mod dedup;
pub mod model;
pub mod normalize;
pub mod output;
pub mod plan;
pub mod scraper;
pub mod sites;
pub mod stats;
pub mod storage;
pub mod url;
pub mod validate;

use thiserror::Error;

/// Main error type for JobScout operations
#[derive(Debug, Error)]
pub enum JobScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] scraper::FetchError),

    #[error("Unknown site: {0}")]
    UnknownSite(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] validate::ValidationError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for JobScout operations
pub type Result<T> = std::result::Result<T, JobScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{ExperienceLevel, JobPosting, RawJob, ScrapeMode};
pub use stats::{RunStats, RunStatus};
