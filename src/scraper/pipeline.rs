//! Pipeline orchestration
//!
//! The single entry point for a run: plan the sources, paginate them into a
//! run-scoped URL set, then walk the detail URLs sequentially through the
//! identity gate, extraction, normalization, validation, and persistence.
//! Everything is sequential awaits on one task; the politeness delay before
//! each fetch is the rate limit.

use crate::config::Config;
use crate::dedup::same_underlying_job;
use crate::model::{JobPosting, ScrapeMode};
use crate::normalize::normalize_job;
use crate::plan::plan;
use crate::scraper::detail::extract_job;
use crate::scraper::fetcher::{build_http_client, fetch_page};
use crate::scraper::incremental::IncrementalController;
use crate::scraper::pagination::collect_source_links;
use crate::sites::{adapter_for, registry, SiteAdapter};
use crate::stats::RunStats;
use crate::storage::JobStore;
use crate::validate::validate_job;
use crate::{JobScoutError, Result};
use chrono::Utc;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;

/// Stop predicate polled between page fetches and between detail URLs
pub type StopSignal = dyn Fn() -> bool + Send + Sync;

/// Consecutive storage failures after which the connection is treated as
/// unusable and the run aborts
const STORAGE_FAILURE_LIMIT: u32 = 3;

/// Whether the failure streak means the connection is gone
///
/// A single statement failure abandons its record only; a streak across
/// records means no storage call is landing anymore.
fn storage_unusable(failures: u32, site_name: &str) -> bool {
    if failures >= STORAGE_FAILURE_LIMIT {
        tracing::error!(
            "Storage unusable after {} consecutive failures, aborting {} run",
            failures,
            site_name
        );
        return true;
    }
    false
}

/// One configured scraping pipeline
pub struct Pipeline {
    config: Config,
    client: Client,
}

impl Pipeline {
    /// Builds the pipeline and its HTTP client from configuration
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.scraper)?;
        Ok(Self { config, client })
    }

    fn delay(&self) -> Duration {
        Duration::from_millis(self.config.scraper.delay_ms)
    }

    /// Runs one site in one mode
    ///
    /// The returned stats are also written to the run log, unconditionally,
    /// before this function returns.
    ///
    /// # Arguments
    ///
    /// * `site_name` - Registry name of the site to scrape
    /// * `mode` - Incremental or full refresh
    /// * `store` - Persistence gateway, opened once for this run
    /// * `should_stop` - External stop predicate (cooperative cancellation)
    pub async fn run(
        &self,
        site_name: &str,
        mode: ScrapeMode,
        store: &mut dyn JobStore,
        should_stop: &StopSignal,
    ) -> Result<RunStats> {
        let adapter =
            adapter_for(site_name).ok_or_else(|| JobScoutError::UnknownSite(site_name.into()))?;
        self.run_adapter(adapter.as_ref(), mode, store, should_stop)
            .await
    }

    /// Runs one already-resolved adapter; the substrate of [`Pipeline::run`]
    ///
    /// Public so tests can drive a site adapter pointed at a local server.
    pub async fn run_adapter(
        &self,
        adapter: &dyn SiteAdapter,
        mode: ScrapeMode,
        store: &mut dyn JobStore,
        should_stop: &StopSignal,
    ) -> Result<RunStats> {
        let site_name = adapter.site_name();
        tracing::info!("Starting {} run for {}", mode, site_name);
        let mut stats = RunStats::start();

        let detail_urls = self
            .collect_detail_urls(adapter, mode, &mut stats, should_stop)
            .await;
        tracing::info!("{}: {} candidate detail URLs", site_name, detail_urls.len());

        self.process_details(adapter, mode, &detail_urls, store, &mut stats, should_stop)
            .await;

        stats.finish();
        if let Err(e) = store.record_run(site_name, mode, &stats) {
            tracing::error!("Failed to record run log for {}: {}", site_name, e);
        }

        tracing::info!(
            "{} run for {} finished: {} found, {} new, {} updated, {} skipped, {} errors ({})",
            mode,
            site_name,
            stats.found,
            stats.new,
            stats.updated,
            stats.skipped,
            stats.errors,
            stats.status().to_db_string()
        );

        Ok(stats)
    }

    /// Runs every registered site sequentially and merges the stats
    pub async fn run_all(
        &self,
        mode: ScrapeMode,
        store: &mut dyn JobStore,
        should_stop: &StopSignal,
    ) -> Result<RunStats> {
        let mut site_names: Vec<&'static str> = registry().into_keys().collect();
        site_names.sort_unstable();

        let mut total = RunStats::start();
        for site_name in site_names {
            if should_stop() {
                break;
            }
            let stats = self.run(site_name, mode, store, should_stop).await?;
            total.merge(&stats);
        }
        total.finish();
        Ok(total)
    }

    /// Plans the sources and paginates them into an ordered unique URL list
    async fn collect_detail_urls(
        &self,
        adapter: &dyn SiteAdapter,
        mode: ScrapeMode,
        stats: &mut RunStats,
        should_stop: &StopSignal,
    ) -> Vec<String> {
        let sources = plan(adapter, mode, self.config.scraper.max_pages);
        let mut seen = HashSet::new();
        let mut detail_urls = Vec::new();

        for source in &sources {
            if should_stop() {
                break;
            }
            let links = collect_source_links(
                &self.client,
                adapter,
                source,
                self.delay(),
                &mut seen,
                stats,
                should_stop,
            )
            .await;
            detail_urls.extend(links);
        }

        detail_urls
    }

    /// Walks the detail URLs through the gate, extraction, and persistence
    async fn process_details(
        &self,
        adapter: &dyn SiteAdapter,
        mode: ScrapeMode,
        detail_urls: &[String],
        store: &mut dyn JobStore,
        stats: &mut RunStats,
        should_stop: &StopSignal,
    ) {
        let site_name = adapter.site_name();
        let today = Utc::now().date_naive();
        let mut controller = IncrementalController::new(mode);
        let mut inserted_this_run: Vec<JobPosting> = Vec::new();
        let mut storage_failures: u32 = 0;

        for url in detail_urls {
            if should_stop() {
                tracing::info!("Stop requested, ending detail loop for {}", site_name);
                break;
            }
            if controller.should_stop() {
                tracing::info!("Duplicate pressure reached, ending {} run early", site_name);
                break;
            }

            stats.found += 1;

            let known = match store.exists(url) {
                Ok(known) => {
                    storage_failures = 0;
                    known
                }
                Err(e) => {
                    tracing::error!("Identity lookup failed for {}: {}", url, e);
                    stats.errors += 1;
                    storage_failures += 1;
                    if storage_unusable(storage_failures, site_name) {
                        break;
                    }
                    continue;
                }
            };

            if known {
                controller.record_skip();
                if mode == ScrapeMode::Incremental {
                    tracing::debug!("Already known, skipping {}", url);
                    stats.skipped += 1;
                    continue;
                }
                // Full refresh re-fetches known URLs to refresh their fields
            } else {
                controller.record_fresh();
            }

            let body = match fetch_page(&self.client, url, self.delay()).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Detail fetch failed: {}", e);
                    stats.errors += 1;
                    continue;
                }
            };

            let Some(raw) = extract_job(&body, url, adapter, today) else {
                stats.errors += 1;
                continue;
            };

            let job = normalize_job(site_name, url, &raw, today);

            if let Err(e) = validate_job(&job) {
                tracing::warn!("Rejecting {}: {}", url, e);
                stats.errors += 1;
                continue;
            }

            if known {
                match store.update(url, &job) {
                    Ok(true) => {
                        storage_failures = 0;
                        stats.updated += 1;
                    }
                    Ok(false) => {
                        storage_failures = 0;
                        stats.skipped += 1;
                    }
                    Err(e) => {
                        tracing::error!("Update failed for {}: {}", url, e);
                        stats.errors += 1;
                        storage_failures += 1;
                        if storage_unusable(storage_failures, site_name) {
                            break;
                        }
                    }
                }
                continue;
            }

            // Advisory near-duplicate signal against this run's own inserts;
            // logged only, the record is still persisted under its own URL
            for prior in &inserted_this_run {
                if same_underlying_job(prior, &job) {
                    tracing::debug!(
                        "Possible cross-listing: {} resembles {}",
                        job.source_url,
                        prior.source_url
                    );
                    break;
                }
            }

            match store.insert(&job) {
                Ok(true) => {
                    storage_failures = 0;
                    stats.new += 1;
                    inserted_this_run.push(job);
                }
                Ok(false) => {
                    // Lost the race against an identical URL inserted earlier
                    // in this same run's accounting
                    storage_failures = 0;
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::error!("Insert failed for {}: {}", url, e);
                    stats.errors += 1;
                    storage_failures += 1;
                    if storage_unusable(storage_failures, site_name) {
                        break;
                    }
                }
            }
        }
    }
}
