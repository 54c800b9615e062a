//! Date sanity clamping and relative-date parsing

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static pattern"));

/// Clamps a date into the plausible posting window
///
/// Dates strictly after `today` become `today`; dates more than 365 days old
/// become `None`.
pub fn clamp_date(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    if date > today {
        return Some(today);
    }
    if (today - date).num_days() > 365 {
        return None;
    }
    Some(date)
}

/// Parses relative listing dates like "3 days ago", "Today", "1 week ago"
///
/// Unparseable text falls back to `today`, matching how listing sites treat
/// undated postings as fresh.
pub fn parse_relative_date(text: &str, today: NaiveDate) -> NaiveDate {
    let text = text.to_lowercase();

    if text.contains("today") || text.contains("just now") || text.contains("just posted") {
        return today;
    }
    if text.contains("yesterday") {
        return today - Duration::days(1);
    }

    if let Some(m) = LEADING_NUMBER.find(&text) {
        if let Ok(num) = m.as_str().parse::<i64>() {
            if text.contains("day") {
                return today - Duration::days(num);
            }
            if text.contains("week") {
                return today - Duration::weeks(num);
            }
            if text.contains("month") {
                return today - Duration::days(num * 30);
            }
            if text.contains("hour") {
                return today;
            }
        }
    }

    today
}
