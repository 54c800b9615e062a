//! Listing-page link extraction
//!
//! Pulls every anchor target off a listing page, normalizes it to an absolute
//! URL, and keeps only the ones that look like detail pages of the site being
//! crawled: same host and a path matching the site's detail shape.

use crate::sites::SiteAdapter;
use crate::url::{normalize_candidate, same_site};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts candidate detail-page URLs from one listing page body
///
/// Results are deduplicated while preserving first-seen order, so the caller
/// can rely on page order for its sparse-tail heuristic.
pub fn extract_listing_links(body: &str, site: &dyn SiteAdapter) -> Vec<String> {
    let document = Html::parse_document(body);

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(candidate) = normalize_candidate(href, site.origin()) else {
            continue;
        };

        if !same_site(&candidate, site.origin()) {
            continue;
        }

        if !is_detail_path(&candidate, site) {
            continue;
        }

        if seen.insert(candidate.clone()) {
            links.push(candidate);
        }
    }

    links
}

/// Checks the path portion of an absolute URL against the site's detail shape
fn is_detail_path(url: &str, site: &dyn SiteAdapter) -> bool {
    match Url::parse(url) {
        Ok(parsed) => site.detail_pattern().is_match(parsed.path()),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::RozeeAdapter;

    fn listing(body_links: &str) -> String {
        format!("<html><body><div class=\"jobs\">{body_links}</div></body></html>")
    }

    #[test]
    fn test_extracts_detail_links_only() {
        let site = RozeeAdapter::new();
        let body = listing(
            r#"
            <a href="https://www.rozee.pk/php-developer-123456">PHP Developer</a>
            <a href="https://www.rozee.pk/jobs-in-karachi/fpn/2">Next page</a>
            <a href="https://www.rozee.pk/about">About</a>
        "#,
        );

        let links = extract_listing_links(&body, &site);
        assert_eq!(links, vec!["https://www.rozee.pk/php-developer-123456"]);
    }

    #[test]
    fn test_resolves_relative_and_protocol_relative() {
        let site = RozeeAdapter::new();
        let body = listing(
            r#"
            <a href="/accountant-234567">A</a>
            <a href="//www.rozee.pk/designer-345678">B</a>
        "#,
        );

        let links = extract_listing_links(&body, &site);
        assert_eq!(
            links,
            vec![
                "https://www.rozee.pk/accountant-234567",
                "https://www.rozee.pk/designer-345678",
            ]
        );
    }

    #[test]
    fn test_foreign_hosts_filtered() {
        let site = RozeeAdapter::new();
        let body = listing(r#"<a href="https://evil.example.com/php-developer-123456">x</a>"#);
        assert!(extract_listing_links(&body, &site).is_empty());
    }

    #[test]
    fn test_duplicates_collapse_in_order() {
        let site = RozeeAdapter::new();
        let body = listing(
            r#"
            <a href="/zebra-handler-111111">Z</a>
            <a href="/accountant-222222">A</a>
            <a href="/zebra-handler-111111">Z again</a>
        "#,
        );

        let links = extract_listing_links(&body, &site);
        assert_eq!(
            links,
            vec![
                "https://www.rozee.pk/zebra-handler-111111",
                "https://www.rozee.pk/accountant-222222",
            ]
        );
    }

    #[test]
    fn test_empty_page_yields_no_links() {
        let site = RozeeAdapter::new();
        assert!(extract_listing_links("<html><body></body></html>", &site).is_empty());
    }
}
