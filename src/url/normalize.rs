//! Candidate URL normalization for listing extraction
//!
//! Anchor targets on listing pages arrive in several shapes: absolute,
//! protocol-relative (`//host/path`), site-relative (`/path`), and
//! occasionally with doubled path separators from naive string concatenation.
//! All of them must resolve to one canonical absolute form against the site
//! origin before dedup and identity checks can work.

use url::Url;

/// Normalizes a raw anchor target into an absolute URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject empty targets
/// 2. Resolve protocol-relative (`//host/...`) against the origin's scheme
/// 3. Resolve path-relative (`/path`) against the origin
/// 4. Collapse accidental doubled path separators without touching the
///    `://` scheme separator
///
/// Returns `None` for targets that cannot be made absolute.
pub fn normalize_candidate(href: &str, origin: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute = if let Some(rest) = href.strip_prefix("//") {
        // Protocol-relative: adopt the origin's scheme
        format!("{}://{}", origin.scheme(), rest)
    } else if href.starts_with('/') {
        // Site-relative: resolve against the origin, keeping any port
        origin.join(href).ok()?.to_string()
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        // Bare relative paths are resolved by the url crate
        origin.join(href).ok()?.to_string()
    };

    let collapsed = collapse_doubled_slashes(&absolute);

    // Round-trip through the parser to reject anything still malformed
    let parsed = Url::parse(&collapsed).ok()?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return None;
    }

    Some(collapsed)
}

/// Collapses repeated `/` in the path portion, leaving `scheme://` intact
pub fn collapse_doubled_slashes(url: &str) -> String {
    let (scheme, rest) = match url.split_once("://") {
        Some((s, r)) => (s, r),
        None => return url.to_string(),
    };

    let mut out = String::with_capacity(rest.len());
    let mut prev_slash = false;
    for c in rest.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }

    format!("{}://{}", scheme, out)
}

/// Checks whether a detail URL is too malformed to fetch
///
/// A raw space or a scheme-less doubled slash both indicate broken
/// concatenation upstream; such URLs are rejected rather than fetched.
pub fn is_malformed_detail_url(url: &str) -> bool {
    if url.contains(' ') {
        return true;
    }

    let without_scheme = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    without_scheme.contains("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://example.com").unwrap()
    }

    #[test]
    fn test_protocol_relative() {
        let result = normalize_candidate("//example.com/path", &origin());
        assert_eq!(result, Some("https://example.com/path".to_string()));
    }

    #[test]
    fn test_path_relative() {
        let result = normalize_candidate("/path", &origin());
        assert_eq!(result, Some("https://example.com/path".to_string()));
    }

    #[test]
    fn test_path_relative_keeps_port() {
        let origin = Url::parse("http://127.0.0.1:8080").unwrap();
        let result = normalize_candidate("/path", &origin);
        assert_eq!(result, Some("http://127.0.0.1:8080/path".to_string()));
    }

    #[test]
    fn test_already_absolute() {
        let result = normalize_candidate("https://example.com/path", &origin());
        assert_eq!(result, Some("https://example.com/path".to_string()));
    }

    #[test]
    fn test_trims_whitespace() {
        let result = normalize_candidate("  /path \n", &origin());
        assert_eq!(result, Some("https://example.com/path".to_string()));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(normalize_candidate("   ", &origin()), None);
    }

    #[test]
    fn test_collapses_doubled_path_slashes() {
        let result = normalize_candidate("https://example.com//jobs//dev-123", &origin());
        assert_eq!(
            result,
            Some("https://example.com/jobs/dev-123".to_string())
        );
    }

    #[test]
    fn test_scheme_separator_survives_collapse() {
        assert_eq!(
            collapse_doubled_slashes("https://example.com///a//b"),
            "https://example.com/a/b"
        );
        assert_eq!(
            collapse_doubled_slashes("http://example.com/a"),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert_eq!(normalize_candidate("ftp://example.com/x", &origin()), None);
        assert_eq!(normalize_candidate("mailto:hr@example.com", &origin()), None);
    }

    #[test]
    fn test_malformed_detects_raw_space() {
        assert!(is_malformed_detail_url("https://example.com/some job-123"));
    }

    #[test]
    fn test_malformed_detects_schemeless_double_slash() {
        assert!(is_malformed_detail_url("https://example.com//jobs/dev-123"));
    }

    #[test]
    fn test_wellformed_url_passes() {
        assert!(!is_malformed_detail_url("https://example.com/jobs/dev-123"));
    }
}
