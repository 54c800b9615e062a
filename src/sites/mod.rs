//! Site adapters
//!
//! Each supported listing site is a strategy value implementing
//! `SiteAdapter`, registered in a name-to-adapter map. The adapter carries
//! everything source-specific: the origin, the detail-page path shape, the
//! listing URL templates per tier, and the selector fallback orders used
//! during extraction.

mod mustakbil;
mod rozee;

pub use mustakbil::MustakbilAdapter;
pub use rozee::RozeeAdapter;

use regex::Regex;
use std::collections::HashMap;
use url::Url;

/// Capabilities one listing site must provide to the pipeline
pub trait SiteAdapter: Send + Sync {
    /// Stable site identifier persisted with every record
    fn site_name(&self) -> &'static str;

    /// Origin all relative listing links resolve against
    fn origin(&self) -> &Url;

    /// Path shape of a detail page (e.g. a numeric job-id suffix)
    fn detail_pattern(&self) -> &Regex;

    /// Home/search feed listing template (`{page}` placeholder)
    fn home_template(&self) -> String;

    fn city_template(&self, slug: &str) -> String;

    fn industry_template(&self, slug: &str) -> String;

    fn category_template(&self, slug: &str) -> String;

    /// Special listing views crawled only in a full refresh
    fn special_templates(&self) -> Vec<(&'static str, String)>;

    /// Ordered selector fallbacks for the primary content region of a
    /// detail page
    fn content_selectors(&self) -> &'static [&'static str] {
        &["main", "article", "div.job-detail", "div.content", "#content"]
    }

    /// Site-name suffixes stripped from `<title>` fallbacks
    fn title_suffixes(&self) -> &'static [&'static str];
}

/// Builds the name-to-adapter registry of all supported sites
pub fn registry() -> HashMap<&'static str, Box<dyn SiteAdapter>> {
    let mut map: HashMap<&'static str, Box<dyn SiteAdapter>> = HashMap::new();
    map.insert("rozee", Box::new(RozeeAdapter::new()));
    map.insert("mustakbil", Box::new(MustakbilAdapter::new()));
    map
}

/// Looks up a single adapter by site name
pub fn adapter_for(site: &str) -> Option<Box<dyn SiteAdapter>> {
    registry().remove(site)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_contains_all_sites() {
        let reg = registry();
        assert!(reg.contains_key("rozee"));
        assert!(reg.contains_key("mustakbil"));
    }

    #[test]
    fn test_adapter_lookup() {
        assert!(adapter_for("rozee").is_some());
        assert!(adapter_for("monster").is_none());
    }

    #[test]
    fn test_templates_contain_page_placeholder() {
        for (_, adapter) in registry() {
            assert!(adapter.home_template().contains("{page}"));
            assert!(adapter.city_template("karachi").contains("{page}"));
            assert!(adapter.industry_template("banking").contains("{page}"));
            assert!(adapter.category_template("sales").contains("{page}"));
            for (_, template) in adapter.special_templates() {
                assert!(template.contains("{page}"));
            }
        }
    }
}
