//! Pagination controller
//!
//! Walks one listing source page by page up to its budget, with early
//! stopping on empty pages and sparse tails. Failure handling is positional:
//! a dead first page abandons the source, a dead later page is skipped.

use crate::plan::Source;
use crate::scraper::fetcher::fetch_page;
use crate::scraper::listing::extract_listing_links;
use crate::sites::SiteAdapter;
use crate::stats::RunStats;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// A later page contributing fewer new links than this ends the source
const SPARSE_TAIL_THRESHOLD: usize = 5;

/// Collects detail URLs from one source, page by page
///
/// `seen` is the run-scoped set shared across all sources of the run; only
/// links new to it are returned. Stop rules, in order of precedence:
///
/// * external stop predicate signalled
/// * page 1 fetch failure (abandons the source, counts an error)
/// * page >1 fetch failure (skips the page, counts an error, continues)
/// * a page with zero detail links
/// * a page >1 contributing fewer than 5 previously-unseen links
pub async fn collect_source_links(
    client: &Client,
    site: &dyn SiteAdapter,
    source: &Source,
    delay: Duration,
    seen: &mut HashSet<String>,
    stats: &mut RunStats,
    should_stop: &(dyn Fn() -> bool + Send + Sync),
) -> Vec<String> {
    let mut collected = Vec::new();

    for page in 1..=source.page_budget {
        if should_stop() {
            tracing::info!("Stop requested, leaving source {}", source.label);
            break;
        }

        let url = source.page_url(page);
        let body = match fetch_page(client, &url, delay).await {
            Ok(body) => body,
            Err(e) if page == 1 => {
                tracing::warn!("Abandoning source {}: {}", source.label, e);
                stats.errors += 1;
                break;
            }
            Err(e) => {
                tracing::warn!("Skipping page {} of {}: {}", page, source.label, e);
                stats.errors += 1;
                continue;
            }
        };

        let links = extract_listing_links(&body, site);
        if links.is_empty() {
            tracing::debug!("Source {} empty at page {}, stopping", source.label, page);
            break;
        }

        let mut new_on_page = 0;
        for link in links {
            if seen.insert(link.clone()) {
                collected.push(link);
                new_on_page += 1;
            }
        }

        tracing::debug!(
            "Source {} page {}: {} new links",
            source.label,
            page,
            new_on_page
        );

        if page > 1 && new_on_page < SPARSE_TAIL_THRESHOLD {
            tracing::debug!("Sparse tail on {} at page {}, stopping", source.label, page);
            break;
        }
    }

    collected
}
