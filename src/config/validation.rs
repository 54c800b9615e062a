//! Configuration validation rules

use crate::config::types::Config;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// Rejects configurations that would make the scraper misbehave: an empty
/// user agent, a zero timeout, or a zero page cap.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.scraper.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "scraper.user-agent must not be empty".to_string(),
        ));
    }

    if config.scraper.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "scraper.timeout-secs must be greater than zero".to_string(),
        ));
    }

    if config.scraper.max_pages == 0 {
        return Err(ConfigError::Validation(
            "scraper.max-pages must be greater than zero".to_string(),
        ));
    }

    if config.output.database_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output.database-path must not be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{OutputConfig, ScraperConfig};

    fn valid_config() -> Config {
        Config {
            scraper: ScraperConfig::default(),
            output: OutputConfig {
                database_path: "./jobs.db".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = valid_config();
        config.scraper.user_agent = "   ".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = valid_config();
        config.scraper.timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_pages_rejected() {
        let mut config = valid_config();
        config.scraper.max_pages = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_database_path_rejected() {
        let mut config = valid_config();
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());
    }
}
