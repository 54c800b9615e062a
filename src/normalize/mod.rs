//! Field normalization
//!
//! Pure functions that canonicalize raw extracted fields into typed values.
//! `normalize_job` applies them in a fixed order; each step is idempotent, so
//! re-normalizing an already-normalized record changes nothing.

mod dates;
mod experience;
mod salary;
mod skills;
mod text;

pub use dates::{clamp_date, parse_relative_date};
pub use experience::parse_experience_level;
pub use salary::{parse_salary, SalaryRange};
pub use skills::{extract_skills, SKILL_VOCABULARY};
pub use text::{clean_text, normalize_city, title_case};

use crate::model::{ExperienceLevel, JobPosting, RawJob};
use chrono::NaiveDate;

/// Converts raw extracted fields into a canonical posting
///
/// Order of operations: text cleanup, city canonicalization, salary parsing
/// and clamping, skill extraction, experience bucketing, date sanity.
pub fn normalize_job(site: &str, url: &str, raw: &RawJob, today: NaiveDate) -> JobPosting {
    let title = clean_text(&raw.title);
    let company = clean_text(raw.company.as_deref().unwrap_or("Unknown Company"));

    let mut job = JobPosting::new(site, url, &title, &company);

    job.location = raw.location.as_deref().map(clean_text).filter(|s| !s.is_empty());

    // Derive city from the location string when the page gave none
    let city_text = raw.city.clone().or_else(|| {
        job.location
            .as_ref()
            .map(|loc| loc.split(',').next().unwrap_or(loc).to_string())
    });
    job.city = city_text
        .map(|c| normalize_city(&c))
        .filter(|c| !c.is_empty());

    if let Some(salary_text) = &raw.salary_text {
        let cleaned = clean_text(salary_text);
        if !cleaned.is_empty() {
            let range = parse_salary(&cleaned);
            job.salary_min = range.min;
            job.salary_max = range.max;
            job.salary_currency = raw
                .salary_currency
                .clone()
                .unwrap_or(range.currency);
            job.salary_text = Some(cleaned);
        }
    }

    job.description = raw
        .description
        .as_deref()
        .map(clean_text)
        .filter(|s| !s.is_empty());

    job.skills = extract_skills(
        job.description.as_deref().unwrap_or(""),
        raw.requirements.as_deref().unwrap_or(""),
    );

    job.experience_level = match &raw.experience_text {
        Some(text) => parse_experience_level(text),
        None => ExperienceLevel::NotSpecified,
    };

    job.job_type = raw
        .job_type
        .as_deref()
        .map(clean_text)
        .filter(|s| !s.is_empty());

    apply_work_mode(&mut job);

    // A page without a posted date is still a live listing, so it dates from
    // the scrape itself
    job.posted_date = match raw.posted_date {
        Some(date) => clamp_date(date, today),
        None => Some(today),
    };
    job.deadline_date = raw.deadline_date.and_then(|d| clamp_date(d, today));

    job
}

/// Sets work-mode flags from remote/hybrid markers in title or job type
///
/// Onsite stays true unless a remote marker was found; hybrid does not clear
/// it (the flags are not mutually exclusive).
fn apply_work_mode(job: &mut JobPosting) {
    let haystack = format!(
        "{} {}",
        job.title.to_lowercase(),
        job.job_type.as_deref().unwrap_or("").to_lowercase()
    );

    if haystack.contains("remote") {
        job.is_remote = true;
        job.is_onsite = false;
    }
    if haystack.contains("hybrid") {
        job.is_hybrid = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn raw(title: &str) -> RawJob {
        RawJob {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_cleans_title_and_company() {
        let mut r = raw("  Senior   Developer ");
        r.company = Some("  Acme \t Ltd ".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.title, "Senior Developer");
        assert_eq!(job.company, "Acme Ltd");
    }

    #[test]
    fn test_missing_company_defaults() {
        let job = normalize_job("rozee", "https://x.pk/j-1234", &raw("Dev"), today());
        assert_eq!(job.company, "Unknown Company");
    }

    #[test]
    fn test_city_derived_from_location() {
        let mut r = raw("Dev");
        r.location = Some("Khi, Sindh, Pakistan".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.city.as_deref(), Some("Karachi"));
    }

    #[test]
    fn test_explicit_city_wins_over_location() {
        let mut r = raw("Dev");
        r.location = Some("Lahore, Pakistan".to_string());
        r.city = Some("isb".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.city.as_deref(), Some("Islamabad"));
    }

    #[test]
    fn test_salary_parsed_and_kept_verbatim() {
        let mut r = raw("Dev");
        r.salary_text = Some("PKR 50,000 - 80,000".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.salary_min, Some(50_000));
        assert_eq!(job.salary_max, Some(80_000));
        assert_eq!(job.salary_text.as_deref(), Some("PKR 50,000 - 80,000"));
    }

    #[test]
    fn test_skills_from_description() {
        let mut r = raw("Dev");
        r.description = Some("Looking for Python and React experience".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert!(job.skills.contains("Python"));
        assert!(job.skills.contains("React"));
    }

    #[test]
    fn test_remote_marker_clears_onsite() {
        let job = normalize_job(
            "rozee",
            "https://x.pk/j-1234",
            &raw("Remote Backend Engineer"),
            today(),
        );
        assert!(job.is_remote);
        assert!(!job.is_onsite);
        assert!(!job.is_hybrid);
    }

    #[test]
    fn test_hybrid_marker_keeps_onsite() {
        let job = normalize_job(
            "rozee",
            "https://x.pk/j-1234",
            &raw("Hybrid QA Engineer"),
            today(),
        );
        assert!(job.is_hybrid);
        assert!(job.is_onsite);
    }

    #[test]
    fn test_future_posted_date_clamped() {
        let mut r = raw("Dev");
        r.posted_date = NaiveDate::from_ymd_opt(2027, 1, 1);
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.posted_date, Some(today()));
    }

    #[test]
    fn test_stale_posted_date_nulled() {
        let mut r = raw("Dev");
        r.posted_date = NaiveDate::from_ymd_opt(2020, 1, 1);
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.posted_date, None);
    }

    #[test]
    fn test_stale_deadline_nulled() {
        let mut r = raw("Dev");
        r.deadline_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert_eq!(job.deadline_date, None);
    }

    #[test]
    fn test_missing_posted_date_defaults_to_today() {
        let job = normalize_job("rozee", "https://x.pk/j-1234", &raw("Dev"), today());
        assert_eq!(job.posted_date, Some(today()));
    }

    #[test]
    fn test_skills_from_requirements_text() {
        let mut r = raw("Dev");
        r.requirements = Some("Must know React and TypeScript".to_string());
        let job = normalize_job("rozee", "https://x.pk/j-1234", &r, today());
        assert!(job.skills.contains("React"));
        assert!(job.skills.contains("TypeScript"));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut r = raw("  Remote   Python Dev ");
        r.company = Some("Acme".to_string());
        r.location = Some("khi".to_string());
        r.salary_text = Some("PKR 60,000".to_string());
        r.description = Some("Python and SQL".to_string());
        r.experience_text = Some("senior".to_string());

        let first = normalize_job("rozee", "https://x.pk/j-1234", &r, today());

        let again = RawJob {
            title: first.title.clone(),
            company: Some(first.company.clone()),
            description: first.description.clone(),
            location: first.location.clone(),
            city: first.city.clone(),
            salary_text: first.salary_text.clone(),
            salary_currency: Some(first.salary_currency.clone()),
            experience_text: Some("senior".to_string()),
            requirements: None,
            job_type: first.job_type.clone(),
            posted_date: first.posted_date,
            deadline_date: first.deadline_date,
            extra: Vec::new(),
        };
        let second = normalize_job("rozee", "https://x.pk/j-1234", &again, today());

        assert_eq!(first, second);
    }
}
