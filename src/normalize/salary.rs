//! Salary string parsing and sanity clamping

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_GROUPS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("static pattern"));

/// PKR monthly values below this are implausible (below the minimum-wage floor)
const PKR_FLOOR: u64 = 10_000;

/// PKR monthly values above this are implausible
const PKR_CAP: u64 = 10_000_000;

/// Parsed salary range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: Option<u64>,
    pub max: Option<u64>,
    pub currency: String,
}

/// Parses a raw salary string into a clamped range
///
/// All numeric groups are extracted after stripping thousands separators.
/// Two or more numbers give min/max as the extremes; exactly one sets both
/// ends. Currency is USD when "USD" or "$" appears, PKR otherwise. PKR values
/// outside the plausible monthly band are nulled, and an inverted range is
/// swapped.
pub fn parse_salary(text: &str) -> SalaryRange {
    let currency = if text.to_uppercase().contains("USD") || text.contains('$') {
        "USD"
    } else {
        "PKR"
    };

    let stripped = text.replace(',', "");
    let numbers: Vec<u64> = NUMBER_GROUPS
        .find_iter(&stripped)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let (mut min, mut max) = match numbers.len() {
        0 => (None, None),
        1 => (Some(numbers[0]), Some(numbers[0])),
        _ => (
            numbers.iter().copied().min(),
            numbers.iter().copied().max(),
        ),
    };

    if currency == "PKR" {
        min = min.filter(|v| *v >= PKR_FLOOR);
        max = max.filter(|v| *v <= PKR_CAP);
    }

    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            std::mem::swap(&mut min, &mut max);
        }
    }

    SalaryRange {
        min,
        max,
        currency: currency.to_string(),
    }
}
