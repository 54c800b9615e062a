//! Text and city normalization

/// Collapses internal whitespace runs to single spaces and trims
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Abbreviation-to-canonical city table for common Pakistani cities
const CITY_ALIASES: &[(&str, &str)] = &[
    ("Isb", "Islamabad"),
    ("Isl", "Islamabad"),
    ("Rwp", "Rawalpindi"),
    ("Lhr", "Lahore"),
    ("Khi", "Karachi"),
    ("Khi.", "Karachi"),
    ("Multan City", "Multan"),
    ("Fsd", "Faisalabad"),
];

/// Canonicalizes a city name
///
/// Known abbreviations map to the canonical city; everything else passes
/// through title-cased. Idempotent: a canonical name maps to itself.
pub fn normalize_city(city: &str) -> String {
    let trimmed = clean_text(city);
    if trimmed.is_empty() {
        return String::new();
    }

    let titled = title_case(&trimmed);

    for (alias, canonical) in CITY_ALIASES {
        if titled == *alias {
            return canonical.to_string();
        }
    }

    titled
}

/// Title-cases each whitespace-separated word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
