//! Core data types for the scraping pipeline
//!
//! This module defines the canonical persisted record (`JobPosting`), the
//! untyped field map produced by detail extraction (`RawJob`), and the small
//! enums shared across pipeline stages.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fmt;

/// Which kind of run the pipeline is performing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeMode {
    /// Bounded, freshness-biased crawl with early stopping
    Incremental,

    /// Exhaustive budget-bounded crawl across all configured tiers
    FullRefresh,
}

impl ScrapeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::FullRefresh => "full_refresh",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "incremental" => Some(Self::Incremental),
            "full_refresh" | "full-refresh" => Some(Self::FullRefresh),
            _ => None,
        }
    }
}

impl fmt::Display for ScrapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Experience tier derived from free-text experience markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
    NotSpecified,
}

impl ExperienceLevel {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Entry => "Entry Level",
            Self::Mid => "Mid Level",
            Self::Senior => "Senior Level",
            Self::Executive => "Executive",
            Self::NotSpecified => "Not Specified",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "Entry Level" => Some(Self::Entry),
            "Mid Level" => Some(Self::Mid),
            "Senior Level" => Some(Self::Senior),
            "Executive" => Some(Self::Executive),
            "Not Specified" => Some(Self::NotSpecified),
            _ => None,
        }
    }
}

/// The canonical persisted job record
///
/// Identity is the `source_url`; it is unique in storage and immutable once
/// the record has been created. All other fields may be updated in place when
/// a later run re-surfaces the same URL with changed content.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    /// Site identifier this record came from (e.g. "rozee")
    pub site_source: String,

    /// Canonical detail-page URL; the dedup identity
    pub source_url: String,

    pub title: String,
    pub company: String,

    /// Raw location string as shown on the page
    pub location: Option<String>,

    /// City derived from the location string
    pub city: Option<String>,

    pub country: String,

    /// Verbatim salary string, kept alongside the parsed range
    pub salary_text: Option<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub salary_currency: String,

    pub description: Option<String>,

    /// Matched skill vocabulary terms; set semantics, order irrelevant
    pub skills: BTreeSet<String>,

    pub experience_level: ExperienceLevel,
    pub job_type: Option<String>,

    // Work-mode flags are not mutually exclusive; onsite holds unless a
    // remote/hybrid marker was found.
    pub is_remote: bool,
    pub is_hybrid: bool,
    pub is_onsite: bool,

    pub posted_date: Option<NaiveDate>,
    pub deadline_date: Option<NaiveDate>,

    pub is_active: bool,
}

impl JobPosting {
    /// Creates a posting with identity fields set and everything else default
    pub fn new(site_source: &str, source_url: &str, title: &str, company: &str) -> Self {
        Self {
            site_source: site_source.to_string(),
            source_url: source_url.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: None,
            city: None,
            country: "Pakistan".to_string(),
            salary_text: None,
            salary_min: None,
            salary_max: None,
            salary_currency: "PKR".to_string(),
            description: None,
            skills: BTreeSet::new(),
            experience_level: ExperienceLevel::NotSpecified,
            job_type: None,
            is_remote: false,
            is_hybrid: false,
            is_onsite: true,
            posted_date: None,
            deadline_date: None,
            is_active: true,
        }
    }
}

/// Untyped fields pulled off a detail page before normalization
///
/// Every field is optional except the title, which the extraction stages
/// guarantee before a `RawJob` is returned at all.
#[derive(Debug, Clone, Default)]
pub struct RawJob {
    pub title: String,
    pub company: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub salary_text: Option<String>,
    pub salary_currency: Option<String>,
    pub experience_text: Option<String>,
    pub job_type: Option<String>,
    pub posted_date: Option<NaiveDate>,
    pub deadline_date: Option<NaiveDate>,

    /// Label/value pairs picked up by the enrichment pass
    pub extra: Vec<(String, String)>,
}
