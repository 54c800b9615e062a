//! Scraping pipeline
//!
//! This module contains the run machinery: the HTTP fetcher, listing-page
//! link extraction, per-source pagination, the incremental early-stop
//! controller, the three-stage detail extractor, and the orchestrating
//! pipeline that ties them to normalization, validation, and storage.

mod detail;
mod fetcher;
mod incremental;
mod listing;
mod pagination;
mod pipeline;

pub use detail::extract_job;
pub use fetcher::{build_http_client, fetch_page, FetchError};
pub use incremental::IncrementalController;
pub use listing::extract_listing_links;
pub use pagination::collect_source_links;
pub use pipeline::{Pipeline, StopSignal};
