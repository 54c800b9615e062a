//! Source/tier planning
//!
//! Each run crawls a fixed, statically configured set of listing sources.
//! Tier membership and page budgets are data, not computation, which keeps the
//! worst-case cost of a run bounded and predictable.

use crate::model::ScrapeMode;
use crate::sites::SiteAdapter;

/// Crawl-priority grouping for a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    City,
    Industry,
    Category,
    Special,
}

/// One crawl target: a listing view of a site plus its page budget
#[derive(Debug, Clone)]
pub struct Source {
    /// Human label for logging ("city:karachi", "special:home")
    pub label: String,

    pub tier: Tier,

    /// URL template containing a `{page}` placeholder
    pub url_template: String,

    /// Listing pages to fetch from this source this run
    pub page_budget: u32,
}

impl Source {
    pub fn new(label: impl Into<String>, tier: Tier, template: impl Into<String>, budget: u32) -> Self {
        Self {
            label: label.into(),
            tier,
            url_template: template.into(),
            page_budget: budget,
        }
    }

    /// Materializes the listing URL for one page number (1-based)
    pub fn page_url(&self, page: u32) -> String {
        self.url_template.replace("{page}", &page.to_string())
    }
}

/// City slugs crawled in a full refresh; the first three are also the
/// incremental set.
pub const CITIES: &[&str] = &[
    "karachi",
    "lahore",
    "islamabad",
    "rawalpindi",
    "faisalabad",
    "multan",
    "peshawar",
    "quetta",
    "sialkot",
    "gujranwala",
    "hyderabad",
];

/// Industry slugs; the first two are also the incremental set.
pub const INDUSTRIES: &[&str] = &[
    "information-technology",
    "banking",
    "telecommunications",
    "education",
    "healthcare",
    "engineering",
    "textile",
    "pharmaceutical",
    "construction",
    "retail",
    "media",
    "insurance",
    "logistics",
    "manufacturing",
];

/// Functional category slugs, full refresh only.
pub const CATEGORIES: &[&str] = &[
    "accounting",
    "sales",
    "marketing",
    "human-resources",
    "customer-service",
    "administration",
    "graphic-design",
    "software-development",
    "data-entry",
    "security",
    "teaching",
    "finance",
];

/// Builds the ordered crawl plan for one site and mode
///
/// Incremental runs prioritize freshness: the home feed plus the top three
/// cities and top two industries, two pages each. Full refresh walks every
/// tier with per-tier budgets. `page_cap` (from configuration) bounds every
/// budget.
pub fn plan(adapter: &dyn SiteAdapter, mode: ScrapeMode, page_cap: u32) -> Vec<Source> {
    let mut sources = Vec::new();

    match mode {
        ScrapeMode::Incremental => {
            sources.push(Source::new(
                "special:home",
                Tier::Special,
                adapter.home_template(),
                2,
            ));
            for city in &CITIES[..3] {
                sources.push(Source::new(
                    format!("city:{city}"),
                    Tier::City,
                    adapter.city_template(city),
                    2,
                ));
            }
            for industry in &INDUSTRIES[..2] {
                sources.push(Source::new(
                    format!("industry:{industry}"),
                    Tier::Industry,
                    adapter.industry_template(industry),
                    2,
                ));
            }
        }
        ScrapeMode::FullRefresh => {
            for (i, city) in CITIES.iter().enumerate() {
                let budget = if i < 3 {
                    5
                } else if i < 7 {
                    4
                } else {
                    3
                };
                sources.push(Source::new(
                    format!("city:{city}"),
                    Tier::City,
                    adapter.city_template(city),
                    budget,
                ));
            }
            for (i, industry) in INDUSTRIES.iter().enumerate() {
                let budget = if i < 5 { 3 } else { 2 };
                sources.push(Source::new(
                    format!("industry:{industry}"),
                    Tier::Industry,
                    adapter.industry_template(industry),
                    budget,
                ));
            }
            for category in CATEGORIES {
                sources.push(Source::new(
                    format!("category:{category}"),
                    Tier::Category,
                    adapter.category_template(category),
                    2,
                ));
            }
            for (label, template) in adapter.special_templates() {
                sources.push(Source::new(
                    format!("special:{label}"),
                    Tier::Special,
                    template,
                    3,
                ));
            }
        }
    }

    for source in &mut sources {
        source.page_budget = source.page_budget.min(page_cap);
    }

    sources
}
