//! JobScout main entry point
//!
//! This is the command-line interface for the JobScout job-posting ingester.

use clap::Parser;
use jobscout::model::ScrapeMode;
use jobscout::scraper::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// JobScout: a bounded-budget job posting ingester
///
/// JobScout crawls the listing pages of supported job sites within fixed
/// per-tier page budgets, extracts detail pages through a layered fallback
/// chain, and persists normalized postings into SQLite keyed by their URL.
#[derive(Parser, Debug)]
#[command(name = "jobscout")]
#[command(version = "1.0.0")]
#[command(about = "A bounded-budget job posting ingester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Site to scrape ("rozee", "mustakbil", or "all")
    #[arg(long, default_value = "all")]
    site: String,

    /// Scrape mode: "incremental" or "full-refresh"
    #[arg(long, default_value = "incremental")]
    mode: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the crawl plan without fetching anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, _config_hash) = match jobscout::config::load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let mode = ScrapeMode::parse(&cli.mode)
        .ok_or_else(|| format!("unknown mode '{}' (expected incremental|full-refresh)", cli.mode))?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.site, mode)?;
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_scrape(config, &cli.site, mode).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("jobscout=info,warn"),
            1 => EnvFilter::new("jobscout=debug,info"),
            2 => EnvFilter::new("jobscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and prints the crawl plan
fn handle_dry_run(
    config: &jobscout::config::Config,
    site: &str,
    mode: ScrapeMode,
) -> Result<(), Box<dyn std::error::Error>> {
    use jobscout::plan::plan;
    use jobscout::sites::registry;

    println!("=== JobScout Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  User agent: {}", config.scraper.user_agent);
    println!("  Delay: {}ms", config.scraper.delay_ms);
    println!("  Timeout: {}s", config.scraper.timeout_secs);
    println!("  Max pages per source: {}", config.scraper.max_pages);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    let reg = registry();
    let mut site_names: Vec<&str> = if site == "all" {
        reg.keys().copied().collect()
    } else if reg.contains_key(site) {
        vec![site]
    } else {
        return Err(format!("unknown site '{}'", site).into());
    };
    site_names.sort_unstable();

    for name in site_names {
        let adapter = reg.get(name).expect("site checked above");
        let sources = plan(adapter.as_ref(), mode, config.scraper.max_pages);
        let total_pages: u32 = sources.iter().map(|s| s.page_budget).sum();

        println!(
            "\nPlan for {} ({} mode): {} sources, {} listing pages",
            name,
            mode,
            sources.len(),
            total_pages
        );
        for source in &sources {
            println!("  - {} ({} pages)", source.label, source.page_budget);
        }
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &jobscout::config::Config) -> Result<(), Box<dyn std::error::Error>> {
    use jobscout::output::{load_statistics, print_statistics};
    use jobscout::storage::open_store;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let store = open_store(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: jobscout::config::Config,
    site: &str,
    mode: ScrapeMode,
) -> Result<(), Box<dyn std::error::Error>> {
    use jobscout::storage::open_store;
    use std::path::Path;

    let mut store = open_store(Path::new(&config.output.database_path))?;
    let pipeline = Pipeline::new(config)?;

    let never_stop = || false;
    let stats = if site == "all" {
        pipeline.run_all(mode, &mut store, &never_stop).await?
    } else {
        pipeline.run(site, mode, &mut store, &never_stop).await?
    };

    println!(
        "Run complete: {} found, {} new, {} updated, {} skipped, {} errors ({})",
        stats.found,
        stats.new,
        stats.updated,
        stats.skipped,
        stats.errors,
        stats.status().to_db_string()
    );

    Ok(())
}
