use serde::Deserialize;

/// Main configuration structure for JobScout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// User-agent string attached to every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Fixed delay applied before every request (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Hard cap on listing pages per source, on top of the tier budgets
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; JobScoutBot/1.0)".to_string(),
            delay_ms: 3000,
            timeout_secs: 30,
            max_pages: 50,
        }
    }
}
