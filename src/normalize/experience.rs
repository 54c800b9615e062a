//! Experience-level bucketing

use crate::model::ExperienceLevel;

const ENTRY_MARKERS: &[&str] = &["entry", "junior", "fresh", "graduate", "fresher", "0-1", "0-2"];
const MID_MARKERS: &[&str] = &["mid", "intermediate", "2-5", "3-5"];
const SENIOR_MARKERS: &[&str] = &["senior", "lead", "principal", "5+", "7+", "6-10"];
const EXECUTIVE_MARKERS: &[&str] = &["executive", "director", "vp", "c-level", "cto", "ceo"];

/// Buckets free-text experience markers into a level
///
/// Tiers are scanned in a fixed priority order (entry, mid, senior,
/// executive) and the first matching tier wins. Text with no marker defaults
/// to mid; empty text stays unspecified.
pub fn parse_experience_level(text: &str) -> ExperienceLevel {
    let text = text.to_lowercase();
    if text.trim().is_empty() {
        return ExperienceLevel::NotSpecified;
    }

    let contains_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

    if contains_any(ENTRY_MARKERS) {
        ExperienceLevel::Entry
    } else if contains_any(MID_MARKERS) {
        ExperienceLevel::Mid
    } else if contains_any(SENIOR_MARKERS) {
        ExperienceLevel::Senior
    } else if contains_any(EXECUTIVE_MARKERS) {
        ExperienceLevel::Executive
    } else {
        ExperienceLevel::Mid
    }
}
