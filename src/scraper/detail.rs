//! Detail-page extraction
//!
//! Three stages run in order, each only when no usable title has been found
//! yet: a schema.org JobPosting JSON-LD block, HTML heading heuristics, and
//! finally the URL path tokens. A page that yields no title of at least three
//! characters is rejected and counted as an error by the caller.
//!
//! After the staged title hunt, an enrichment pass scans the page for
//! label/value rows (career level, job shift, apply before, ...) and runs
//! ordered experience regexes over the description.

use crate::model::RawJob;
use crate::normalize::parse_relative_date;
use crate::sites::SiteAdapter;
use crate::url::{is_malformed_detail_url, title_from_url};
use crate::validate::is_blacklisted_title;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Minimum usable title length after trimming
const MIN_TITLE_LEN: usize = 3;

/// Labels recognized by the enrichment pass, lowercased
const ENRICHMENT_LABELS: &[&str] = &[
    "industry",
    "functional area",
    "career level",
    "job shift",
    "job type",
    "positions",
    "minimum education",
    "degree",
    "gender",
    "age range",
    "apply before",
    "requirements",
    "qualifications",
    "experience",
    "location",
    "city",
    "salary",
    "posted",
];

/// Ordered experience patterns scanned over the description; the first match
/// wins. Ranges are reformatted so the bucketing markers recognize them.
static EXPERIENCE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:-|to)\s*(\d+)\s*years?").unwrap());
static EXPERIENCE_MINIMUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)minimum\s+(?:of\s+)?(\d+)\s*years?").unwrap());
static EXPERIENCE_AT_LEAST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)at\s+least\s+(\d+)\s*years?").unwrap());

/// Extracts raw job fields from one detail page
///
/// # Arguments
///
/// * `body` - The detail page HTML
/// * `url` - The page's own URL, used by the last-resort title stage
/// * `site` - The adapter whose selector orders and title suffixes apply
/// * `today` - Reference date for relative posted-date text
///
/// # Returns
///
/// `None` when the URL is malformed or no stage produced a usable title;
/// the caller counts that as an extraction error.
pub fn extract_job(
    body: &str,
    url: &str,
    site: &dyn SiteAdapter,
    today: NaiveDate,
) -> Option<RawJob> {
    if is_malformed_detail_url(url) {
        tracing::warn!("Rejecting malformed detail URL: {}", url);
        return None;
    }

    let document = Html::parse_document(body);

    let mut raw = stage_json_ld(&document).unwrap_or_default();

    if !usable_title(&raw.title) {
        stage_html_heuristics(&document, site, &mut raw);
    }

    if !usable_title(&raw.title) {
        if let Some(title) = title_from_url(url) {
            tracing::debug!("Falling back to URL-derived title for {}", url);
            raw.title = title;
        }
    }

    if !usable_title(&raw.title) {
        tracing::warn!("No usable title extracted from {}", url);
        return None;
    }

    enrich(&document, &mut raw, today);

    Some(raw)
}

fn usable_title(title: &str) -> bool {
    let trimmed = title.trim();
    trimmed.len() >= MIN_TITLE_LEN && !is_blacklisted_title(trimmed)
}

/// Stage 1: schema.org JobPosting JSON-LD
fn stage_json_ld(document: &Html) -> Option<RawJob> {
    let selector = Selector::parse(r#"script[type="application/ld+json"]"#).ok()?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        let Ok(value) = serde_json::from_str::<Value>(&text) else {
            continue;
        };

        // A block may be a single object or an array of objects
        let candidates: Vec<&Value> = match &value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };

        for candidate in candidates {
            if !is_job_posting(candidate) {
                continue;
            }
            if let Some(raw) = job_from_json_ld(candidate) {
                return Some(raw);
            }
        }
    }

    None
}

fn is_job_posting(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == "JobPosting",
        Some(Value::Array(types)) => types.iter().any(|t| t == "JobPosting"),
        _ => false,
    }
}

fn job_from_json_ld(value: &Value) -> Option<RawJob> {
    let title = value.get("title")?.as_str()?.trim().to_string();
    if title.is_empty() {
        return None;
    }

    let mut raw = RawJob {
        title,
        ..Default::default()
    };

    raw.company = value
        .pointer("/hiringOrganization/name")
        .and_then(Value::as_str)
        .map(str::to_string);

    raw.description = value
        .get("description")
        .and_then(Value::as_str)
        .map(strip_tags);

    raw.requirements = value
        .get("qualifications")
        .and_then(Value::as_str)
        .map(strip_tags);

    raw.city = value
        .pointer("/jobLocation/address/addressLocality")
        .and_then(Value::as_str)
        .map(str::to_string);

    raw.job_type = value
        .get("employmentType")
        .and_then(Value::as_str)
        .map(str::to_string);

    raw.posted_date = value
        .get("datePosted")
        .and_then(Value::as_str)
        .and_then(parse_iso_date);

    raw.deadline_date = value
        .get("validThrough")
        .and_then(Value::as_str)
        .and_then(parse_iso_date);

    if let Some(base_salary) = value.get("baseSalary") {
        raw.salary_currency = base_salary
            .get("currency")
            .and_then(Value::as_str)
            .map(str::to_string);
        raw.salary_text = salary_text_from_json_ld(base_salary);
    }

    Some(raw)
}

/// Renders a baseSalary value object as a parseable salary string
fn salary_text_from_json_ld(base_salary: &Value) -> Option<String> {
    let value = base_salary.get("value")?;

    let min = value.get("minValue").and_then(Value::as_f64);
    let max = value.get("maxValue").and_then(Value::as_f64);
    let single = value.get("value").and_then(Value::as_f64);

    let text = match (min, max, single) {
        (Some(lo), Some(hi), _) => format!("{} - {}", lo as u64, hi as u64),
        (_, _, Some(v)) => format!("{}", v as u64),
        (Some(lo), None, None) => format!("{}", lo as u64),
        (None, Some(hi), None) => format!("{}", hi as u64),
        _ => return None,
    };

    match value.get("unitText").and_then(Value::as_str) {
        Some(unit) => Some(format!("{} per {}", text, unit.to_lowercase())),
        None => Some(text),
    }
}

/// Stage 2: heading heuristics with the adapter's selector fallback order
fn stage_html_heuristics(document: &Html, site: &dyn SiteAdapter, raw: &mut RawJob) {
    // h1 inside the primary content region, trying each region selector
    for region_selector in site.content_selectors() {
        let Ok(selector) = Selector::parse(&format!("{region_selector} h1")) else {
            continue;
        };
        if let Some(heading) = document.select(&selector).next() {
            let text = element_text(&heading);
            if usable_title(&text) {
                raw.title = text;
                fill_description_from_region(document, region_selector, raw);
                return;
            }
        }
    }

    // Page-wide headings, skipping placeholder section headings
    if let Ok(selector) = Selector::parse("h1, h2, h3") {
        for heading in document.select(&selector) {
            let text = element_text(&heading);
            if usable_title(&text) {
                raw.title = text;
                return;
            }
        }
    }

    // <title> with the site-name suffix stripped
    if let Ok(selector) = Selector::parse("title") {
        if let Some(title_el) = document.select(&selector).next() {
            let mut text = element_text(&title_el);
            for suffix in site.title_suffixes() {
                if let Some(stripped) = text.strip_suffix(suffix) {
                    text = stripped.trim().to_string();
                    break;
                }
            }
            if usable_title(&text) {
                raw.title = text;
            }
        }
    }
}

fn fill_description_from_region(document: &Html, region_selector: &str, raw: &mut RawJob) {
    if raw.description.is_some() {
        return;
    }
    if let Ok(selector) = Selector::parse(region_selector) {
        if let Some(region) = document.select(&selector).next() {
            let text = element_text(&region);
            if !text.is_empty() {
                raw.description = Some(text);
            }
        }
    }
}

/// Enrichment pass: label/value rows and description experience patterns
fn enrich(document: &Html, raw: &mut RawJob, today: NaiveDate) {
    for (label, value) in scan_label_values(document) {
        match label.as_str() {
            "career level" | "experience" => {
                if raw.experience_text.is_none() {
                    raw.experience_text = Some(value.clone());
                }
            }
            "job shift" | "job type" => {
                if raw.job_type.is_none() {
                    raw.job_type = Some(value.clone());
                }
            }
            "requirements" | "qualifications" => {
                if raw.requirements.is_none() {
                    raw.requirements = Some(value.clone());
                }
            }
            "apply before" => {
                if raw.deadline_date.is_none() {
                    raw.deadline_date = parse_loose_date(&value);
                }
            }
            "posted" => {
                if raw.posted_date.is_none() {
                    raw.posted_date = parse_loose_date(&value)
                        .or_else(|| Some(parse_relative_date(&value, today)));
                }
            }
            "city" => {
                if raw.city.is_none() {
                    raw.city = Some(value.clone());
                }
            }
            "location" => {
                if raw.location.is_none() {
                    raw.location = Some(value.clone());
                }
            }
            "salary" => {
                if raw.salary_text.is_none() {
                    raw.salary_text = Some(value.clone());
                }
            }
            _ => {}
        }
        raw.extra.push((label, value));
    }

    if raw.experience_text.is_none() {
        if let Some(desc) = &raw.description {
            raw.experience_text = experience_from_description(desc);
        }
    }
}

/// Collects "Label: Value" rows with recognized labels
fn scan_label_values(document: &Html) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    let Ok(selector) = Selector::parse("li, td, dt, dd, p, span, div") else {
        return pairs;
    };

    for element in document.select(&selector) {
        // Only leaf-ish elements, so container divs don't swallow whole pages
        if element.children().any(|c| c.value().is_element()) {
            continue;
        }

        let text = element_text(&element);
        let Some((label, value)) = text.split_once(':') else {
            continue;
        };

        let label = label.trim().to_lowercase();
        let value = value.trim().to_string();
        if value.is_empty() {
            continue;
        }

        if ENRICHMENT_LABELS.contains(&label.as_str()) {
            pairs.push((label, value));
        }
    }

    pairs
}

/// First matching experience pattern over the description, reformatted so the
/// bucketing markers pick it up
fn experience_from_description(description: &str) -> Option<String> {
    if let Some(caps) = EXPERIENCE_RANGE.captures(description) {
        return Some(format!("{}-{} years", &caps[1], &caps[2]));
    }
    if let Some(caps) = EXPERIENCE_MINIMUM.captures(description) {
        return Some(format!("{}+ years", &caps[1]));
    }
    if let Some(caps) = EXPERIENCE_AT_LEAST.captures(description) {
        return Some(format!("{}+ years", &caps[1]));
    }
    None
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses the date portion of an ISO 8601 string ("2026-06-01T09:00:00+05:00")
fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let date_part = text.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Parses the absolute date formats listing sites actually use
fn parse_loose_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    for format in ["%Y-%m-%d", "%d %b %Y", "%d %B %Y", "%b %d, %Y", "%B %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    None
}

/// Drops HTML tags that JSON-LD descriptions often embed
fn strip_tags(text: &str) -> String {
    static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
    TAG.replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::RozeeAdapter;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn site() -> RozeeAdapter {
        RozeeAdapter::new()
    }

    const URL: &str = "https://www.rozee.pk/php-developer-123456";

    #[test]
    fn test_json_ld_stage() {
        let body = r#"
            <html><head>
            <script type="application/ld+json">
            {
                "@type": "JobPosting",
                "title": "PHP Developer",
                "hiringOrganization": {"name": "Acme Ltd"},
                "description": "<p>We need 3 to 5 years of PHP and MySQL.</p>",
                "datePosted": "2026-06-01",
                "validThrough": "2026-07-01T00:00:00",
                "employmentType": "FULL_TIME",
                "jobLocation": {"address": {"addressLocality": "Karachi"}},
                "baseSalary": {
                    "currency": "PKR",
                    "value": {"minValue": 50000, "maxValue": 80000, "unitText": "MONTH"}
                }
            }
            </script>
            </head><body><h1>Should not be used</h1></body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "PHP Developer");
        assert_eq!(raw.company.as_deref(), Some("Acme Ltd"));
        assert_eq!(raw.city.as_deref(), Some("Karachi"));
        assert_eq!(raw.job_type.as_deref(), Some("FULL_TIME"));
        assert_eq!(raw.posted_date, NaiveDate::from_ymd_opt(2026, 6, 1));
        assert_eq!(raw.deadline_date, NaiveDate::from_ymd_opt(2026, 7, 1));
        assert_eq!(raw.salary_currency.as_deref(), Some("PKR"));
        assert_eq!(raw.salary_text.as_deref(), Some("50000 - 80000 per month"));
        // Description had its markup stripped
        assert_eq!(
            raw.description.as_deref(),
            Some("We need 3 to 5 years of PHP and MySQL.")
        );
        // Experience pulled from the description range
        assert_eq!(raw.experience_text.as_deref(), Some("3-5 years"));
    }

    #[test]
    fn test_html_heading_stage() {
        let body = r#"
            <html><body>
            <main>
                <h1>Senior Accountant</h1>
                <p>Prepare ledgers. Minimum 5 years required.</p>
            </main>
            </body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "Senior Accountant");
        assert!(raw.description.as_deref().unwrap().contains("ledgers"));
        assert_eq!(raw.experience_text.as_deref(), Some("5+ years"));
    }

    #[test]
    fn test_page_wide_headings_skip_placeholders() {
        let body = r#"
            <html><body>
            <h2>Similar Jobs</h2>
            <h2>Graphic Designer</h2>
            </body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "Graphic Designer");
    }

    #[test]
    fn test_title_tag_stage_strips_suffix() {
        let body = r#"
            <html><head><title>Data Entry Operator - Rozee.pk</title></head>
            <body><p>no headings here</p></body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "Data Entry Operator");
    }

    #[test]
    fn test_url_stage_is_last_resort() {
        let body = "<html><body><p>nothing useful</p></body></html>";
        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "Php Developer");
    }

    #[test]
    fn test_no_title_anywhere_rejected() {
        let body = "<html><body></body></html>";
        // All-numeric final segment defeats the URL stage too
        let raw = extract_job(body, "https://www.rozee.pk/123456", &site(), today());
        assert!(raw.is_none());
    }

    #[test]
    fn test_malformed_url_rejected() {
        let body = "<html><body><h1>Real Job</h1></body></html>";
        assert!(extract_job(body, "https://www.rozee.pk/some job-123", &site(), today()).is_none());
        assert!(extract_job(body, "https://www.rozee.pk//x/dev-123", &site(), today()).is_none());
    }

    #[test]
    fn test_enrichment_label_scan() {
        let body = r#"
            <html><body>
            <h1>Office Manager</h1>
            <ul>
                <li>Career Level: Experienced Professional</li>
                <li>Job Shift: First Shift (Day)</li>
                <li>Apply Before: 15 Jul 2026</li>
                <li>Gender: No Preference</li>
            </ul>
            </body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(
            raw.experience_text.as_deref(),
            Some("Experienced Professional")
        );
        assert_eq!(raw.job_type.as_deref(), Some("First Shift (Day)"));
        assert_eq!(raw.deadline_date, NaiveDate::from_ymd_opt(2026, 7, 15));
        assert!(raw
            .extra
            .iter()
            .any(|(k, v)| k == "gender" && v == "No Preference"));
    }

    #[test]
    fn test_requirements_label_captured() {
        let body = r#"
            <html><body>
            <h1>Backend Developer</h1>
            <p>Requirements: Python, Django and PostgreSQL</p>
            </body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(
            raw.requirements.as_deref(),
            Some("Python, Django and PostgreSQL")
        );
    }

    #[test]
    fn test_relative_posted_date() {
        let body = r#"
            <html><body>
            <h1>Office Manager</h1>
            <span>Posted: 3 days ago</span>
            </body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.posted_date, NaiveDate::from_ymd_opt(2026, 6, 12));
    }

    #[test]
    fn test_json_ld_array_block() {
        let body = r#"
            <html><head>
            <script type="application/ld+json">
            [{"@type": "BreadcrumbList"},
             {"@type": "JobPosting", "title": "QA Engineer"}]
            </script>
            </head><body></body></html>
        "#;

        let raw = extract_job(body, URL, &site(), today()).unwrap();
        assert_eq!(raw.title, "QA Engineer");
    }
}
