//! URL handling: candidate normalization and detail-shape matching

mod normalize;

pub use normalize::{collapse_doubled_slashes, is_malformed_detail_url, normalize_candidate};

use url::Url;

/// Returns true when `url` belongs to the same registrable host as `origin`
///
/// A leading `www.` on either side is ignored so that
/// `https://rozee.pk/...` and `https://www.rozee.pk/...` compare equal.
pub fn same_site(url: &str, origin: &Url) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match (parsed.host_str(), origin.host_str()) {
        (Some(a), Some(b)) => strip_www(a).eq_ignore_ascii_case(strip_www(b)),
        _ => false,
    }
}

fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Derives a human-readable title from a detail URL's last path segment
///
/// Used as the extraction stage of last resort: the job-id suffix is removed,
/// separators become spaces, and each word is title-cased.
pub fn title_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;

    // Strip a trailing numeric job-id token ("senior-dev-123456" -> "senior-dev")
    let mut parts: Vec<&str> = segment.split(['-', '_']).collect();
    while let Some(last) = parts.last() {
        if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
            parts.pop();
        } else {
            break;
        }
    }

    let words: Vec<String> = parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(title_case_word)
        .collect();

    if words.is_empty() {
        return None;
    }

    Some(words.join(" "))
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_ignores_www() {
        let origin = Url::parse("https://www.rozee.pk").unwrap();
        assert!(same_site("https://rozee.pk/jobs/dev-123", &origin));
        assert!(same_site("https://www.rozee.pk/jobs/dev-123", &origin));
        assert!(!same_site("https://mustakbil.com/jobs/1", &origin));
    }

    #[test]
    fn test_title_from_url_strips_id() {
        let title = title_from_url("https://rozee.pk/senior-php-developer-123456").unwrap();
        assert_eq!(title, "Senior Php Developer");
    }

    #[test]
    fn test_title_from_url_underscores() {
        let title = title_from_url("https://example.com/jobs/data_entry_operator_99").unwrap();
        assert_eq!(title, "Data Entry Operator");
    }

    #[test]
    fn test_title_from_url_all_numeric_segment() {
        assert_eq!(title_from_url("https://example.com/jobs/123456"), None);
    }
}
