//! Rozee.pk adapter
//!
//! Detail pages carry a trailing numeric job id
//! (`/senior-php-developer-karachi-1234567`), which is the path shape the
//! listing extractor filters on.

use crate::sites::SiteAdapter;
use regex::Regex;
use url::Url;

const ORIGIN: &str = "https://www.rozee.pk";
const DETAIL_PATH: &str = r"^/[a-zA-Z0-9][a-zA-Z0-9_-]*-\d{4,}$";

pub struct RozeeAdapter {
    origin: Url,
    detail_pattern: Regex,
}

impl RozeeAdapter {
    pub fn new() -> Self {
        Self::with_origin(Url::parse(ORIGIN).expect("static origin parses"))
    }

    /// Builds the adapter against a different origin; used by integration
    /// tests that stand up a local mock server.
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

impl Default for RozeeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteAdapter for RozeeAdapter {
    fn site_name(&self) -> &'static str {
        "rozee"
    }

    fn origin(&self) -> &Url {
        &self.origin
    }

    fn detail_pattern(&self) -> &Regex {
        &self.detail_pattern
    }

    fn home_template(&self) -> String {
        format!("{}/job/jsearch/q/all/fpn/{{page}}", self.base())
    }

    fn city_template(&self, slug: &str) -> String {
        format!("{}/jobs-in-{}/fpn/{{page}}", self.base(), slug)
    }

    fn industry_template(&self, slug: &str) -> String {
        format!("{}/industry/{}-jobs/fpn/{{page}}", self.base(), slug)
    }

    fn category_template(&self, slug: &str) -> String {
        format!("{}/category/{}-jobs/fpn/{{page}}", self.base(), slug)
    }

    fn special_templates(&self) -> Vec<(&'static str, String)> {
        vec![
            ("home", self.home_template()),
            ("featured", format!("{}/featured-jobs/fpn/{{page}}", self.base())),
            ("top", format!("{}/top-jobs/fpn/{{page}}", self.base())),
        ]
    }

    fn title_suffixes(&self) -> &'static [&'static str] {
        &[" - Rozee.pk", " | Rozee.pk", " - ROZEE.PK"]
    }
}
