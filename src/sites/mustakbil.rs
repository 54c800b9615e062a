//! Mustakbil.com adapter
//!
//! Detail pages live under `/jobs/job/<slug>-<id>`.

use crate::sites::SiteAdapter;
use regex::Regex;
use url::Url;

const ORIGIN: &str = "https://www.mustakbil.com";
const DETAIL_PATH: &str = r"^/jobs/job/[a-zA-Z0-9_-]*\d+$";

pub struct MustakbilAdapter {
    origin: Url,
    detail_pattern: Regex,
}

impl MustakbilAdapter {
    pub fn new() -> Self {
        Self::with_origin(Url::parse(ORIGIN).expect("static origin parses"))
    }

    pub fn with_origin(origin: Url) -> Self {
        Self {
            origin,
            detail_pattern: Regex::new(DETAIL_PATH).expect("static pattern compiles"),
        }
    }

    fn base(&self) -> String {
        self.origin.as_str().trim_end_matches('/').to_string()
    }
}

impl Default for MustakbilAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for MustakbilAdapter {
    fn site_name(&self) -> &'static str {
        "mustakbil"
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    fn detail_pattern(&self) -> &Regex {
        &self.detail_pattern
    }

    fn home_template(&self) -> String {
        format!("{}/jobs?page={{page}}", self.base())
    }

    fn city_template(&self, slug: &str) -> String {
        format!("{}/jobs/city/{}?page={{page}}", self.base(), slug)
    }

    fn industry_template(&self, slug: &str) -> String {
        format!("{}/jobs/industry/{}?page={{page}}", self.base(), slug)
    }

    fn category_template(&self, slug: &str) -> String {
        format!("{}/jobs/category/{}?page={{page}}", self.base(), slug)
    }

    fn special_templates(&self) -> Vec<(&'static str, String)> {
        vec![
            ("home", self.home_template()),
            ("featured", format!("{}/jobs/featured?page={{page}}", self.base())),
            ("top", format!("{}/jobs/top?page={{page}}", self.base())),
        ]
    }

    fn title_suffixes(&self) -> &'static [&'static str] {
        &[" - Mustakbil.com", " | Mustakbil", " - Jobs in Pakistan - Mustakbil.com"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_pattern_matches_job_pages() {
        let adapter = MustakbilAdapter::new();
        assert!(adapter.detail_pattern().is_match("/jobs/job/web-developer-88123"));
        assert!(adapter.detail_pattern().is_match("/jobs/job/9912"));
    }

    #[test]
    fn test_detail_pattern_rejects_listing_pages() {
        let adapter = MustakbilAdapter::new();
        assert!(!adapter.detail_pattern().is_match("/jobs"));
        assert!(!adapter.detail_pattern().is_match("/jobs/city/lahore"));
        assert!(!adapter.detail_pattern().is_match("/jobs/job/"));
    }

    #[test]
    fn test_templates_use_query_pagination() {
        let adapter = MustakbilAdapter::new();
        assert_eq!(
            adapter.home_template(),
            "https://www.mustakbil.com/jobs?page={page}"
        );
    }
}
