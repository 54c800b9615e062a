//! SQLite implementation of the `JobStore` trait

use crate::model::{ExperienceLevel, JobPosting, ScrapeMode};
use crate::stats::{RunStats, RunStatus};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{JobStore, RunLogRecord, StorageResult};
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;
use std::path::Path;

const JOB_COLUMNS: &str = "source_url, site_source, title, company, location, city, country,
    salary_text, salary_min, salary_max, salary_currency, description, skills,
    experience_level, job_type, is_remote, is_hybrid, is_onsite,
    posted_date, deadline_date, is_active";

/// SQLite storage backend
///
/// The connection is acquired once per run and held for its duration; there
/// is no pooling and no sharing across runs.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database at the given path
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn row_to_job(row: &Row<'_>) -> rusqlite::Result<JobPosting> {
        let skills_json: String = row.get(12)?;
        let skills: BTreeSet<String> =
            serde_json::from_str(&skills_json).unwrap_or_default();

        let level: String = row.get(13)?;

        let posted: Option<String> = row.get(18)?;
        let deadline: Option<String> = row.get(19)?;

        Ok(JobPosting {
            source_url: row.get(0)?,
            site_source: row.get(1)?,
            title: row.get(2)?,
            company: row.get(3)?,
            location: row.get(4)?,
            city: row.get(5)?,
            country: row.get(6)?,
            salary_text: row.get(7)?,
            salary_min: row.get::<_, Option<i64>>(8)?.map(|v| v as u64),
            salary_max: row.get::<_, Option<i64>>(9)?.map(|v| v as u64),
            salary_currency: row.get(10)?,
            description: row.get(11)?,
            skills,
            experience_level: ExperienceLevel::from_db_string(&level)
                .unwrap_or(ExperienceLevel::NotSpecified),
            job_type: row.get(14)?,
            is_remote: row.get::<_, i64>(15)? != 0,
            is_hybrid: row.get::<_, i64>(16)? != 0,
            is_onsite: row.get::<_, i64>(17)? != 0,
            posted_date: posted.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            deadline_date: deadline.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            is_active: row.get::<_, i64>(20)? != 0,
        })
    }
}

impl JobStore for SqliteStore {
    fn exists(&self, source_url: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM jobs WHERE source_url = ?1",
                params![source_url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert(&mut self, job: &JobPosting) -> StorageResult<bool> {
        let now = Utc::now().to_rfc3339();
        let skills = serde_json::to_string(&job.skills)?;

        let changed = self.conn.execute(
            &format!(
                "INSERT INTO jobs ({JOB_COLUMNS}, created_at, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                         ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
                 ON CONFLICT(source_url) DO NOTHING"
            ),
            params![
                job.source_url,
                job.site_source,
                job.title,
                job.company,
                job.location,
                job.city,
                job.country,
                job.salary_text,
                job.salary_min.map(|v| v as i64),
                job.salary_max.map(|v| v as i64),
                job.salary_currency,
                job.description,
                skills,
                job.experience_level.to_db_string(),
                job.job_type,
                job.is_remote as i64,
                job.is_hybrid as i64,
                job.is_onsite as i64,
                job.posted_date.map(|d| d.to_string()),
                job.deadline_date.map(|d| d.to_string()),
                job.is_active as i64,
                now,
                now,
            ],
        )?;

        Ok(changed > 0)
    }

    fn update(&mut self, source_url: &str, job: &JobPosting) -> StorageResult<bool> {
        let now = Utc::now().to_rfc3339();
        let skills = serde_json::to_string(&job.skills)?;

        let changed = self.conn.execute(
            "UPDATE jobs SET
                title = ?1, company = ?2, location = ?3, city = ?4, country = ?5,
                salary_text = ?6, salary_min = ?7, salary_max = ?8, salary_currency = ?9,
                description = ?10, skills = ?11, experience_level = ?12, job_type = ?13,
                is_remote = ?14, is_hybrid = ?15, is_onsite = ?16,
                posted_date = ?17, deadline_date = ?18, is_active = ?19,
                last_updated = ?20
             WHERE source_url = ?21",
            params![
                job.title,
                job.company,
                job.location,
                job.city,
                job.country,
                job.salary_text,
                job.salary_min.map(|v| v as i64),
                job.salary_max.map(|v| v as i64),
                job.salary_currency,
                job.description,
                skills,
                job.experience_level.to_db_string(),
                job.job_type,
                job.is_remote as i64,
                job.is_hybrid as i64,
                job.is_onsite as i64,
                job.posted_date.map(|d| d.to_string()),
                job.deadline_date.map(|d| d.to_string()),
                job.is_active as i64,
                now,
                source_url,
            ],
        )?;

        Ok(changed > 0)
    }

    fn get_by_url(&self, source_url: &str) -> StorageResult<Option<JobPosting>> {
        let job = self
            .conn
            .query_row(
                &format!("SELECT {JOB_COLUMNS} FROM jobs WHERE source_url = ?1"),
                params![source_url],
                Self::row_to_job,
            )
            .optional()?;
        Ok(job)
    }

    fn count_jobs(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn record_run(
        &mut self,
        site: &str,
        mode: ScrapeMode,
        stats: &RunStats,
    ) -> StorageResult<()> {
        let completed = stats
            .finished_at
            .unwrap_or_else(Utc::now)
            .to_rfc3339();

        self.conn.execute(
            "INSERT INTO scrape_logs (
                site_name, scrape_mode, started_at, completed_at,
                jobs_found, jobs_new, jobs_updated, jobs_skipped, errors, status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                site,
                mode.as_str(),
                stats.started_at.to_rfc3339(),
                completed,
                stats.found as i64,
                stats.new as i64,
                stats.updated as i64,
                stats.skipped as i64,
                stats.errors as i64,
                stats.status().to_db_string(),
            ],
        )?;
        Ok(())
    }

    fn recent_runs(&self, limit: u32) -> StorageResult<Vec<RunLogRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT site_name, scrape_mode, started_at, completed_at,
                    jobs_found, jobs_new, jobs_updated, jobs_skipped, errors, status
             FROM scrape_logs ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map(params![limit], |row| {
                Ok(RunLogRecord {
                    site_name: row.get(0)?,
                    scrape_mode: row.get(1)?,
                    started_at: row.get(2)?,
                    completed_at: row.get(3)?,
                    jobs_found: row.get::<_, i64>(4)? as u64,
                    jobs_new: row.get::<_, i64>(5)? as u64,
                    jobs_updated: row.get::<_, i64>(6)? as u64,
                    jobs_skipped: row.get::<_, i64>(7)? as u64,
                    errors: row.get::<_, i64>(8)? as u64,
                    status: RunStatus::from_db_string(&row.get::<_, String>(9)?)
                        .unwrap_or(RunStatus::Failed),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job(url: &str) -> JobPosting {
        let mut job = JobPosting::new("rozee", url, "PHP Developer", "Acme Ltd");
        job.city = Some("Karachi".to_string());
        job.salary_min = Some(50_000);
        job.salary_max = Some(80_000);
        job.skills.insert("PHP".to_string());
        job.skills.insert("MySQL".to_string());
        job.experience_level = ExperienceLevel::Mid;
        job.posted_date = NaiveDate::from_ymd_opt(2026, 6, 1);
        job
    }

    #[test]
    fn test_insert_and_exists() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let job = sample_job("https://www.rozee.pk/php-developer-123456");

        assert!(!store.exists(&job.source_url).unwrap());
        assert!(store.insert(&job).unwrap());
        assert!(store.exists(&job.source_url).unwrap());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let job = sample_job("https://www.rozee.pk/php-developer-123456");

        assert!(store.insert(&job).unwrap());
        // Second insert of the same identity URL is a no-op, not an error
        assert!(!store.insert(&job).unwrap());
        assert_eq!(store.count_jobs().unwrap(), 1);
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let job = sample_job("https://www.rozee.pk/php-developer-123456");
        store.insert(&job).unwrap();

        let loaded = store.get_by_url(&job.source_url).unwrap().unwrap();
        assert_eq!(loaded, job);
    }

    #[test]
    fn test_update_changes_fields_in_place() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let mut job = sample_job("https://www.rozee.pk/php-developer-123456");
        store.insert(&job).unwrap();

        job.salary_max = Some(95_000);
        job.title = "Senior PHP Developer".to_string();
        assert!(store.update(&job.source_url, &job).unwrap());

        let loaded = store.get_by_url(&job.source_url).unwrap().unwrap();
        assert_eq!(loaded.salary_max, Some(95_000));
        assert_eq!(loaded.title, "Senior PHP Developer");
        assert_eq!(store.count_jobs().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_row_returns_false() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let job = sample_job("https://www.rozee.pk/php-developer-123456");
        assert!(!store.update(&job.source_url, &job).unwrap());
    }

    #[test]
    fn test_record_and_read_run_log() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        let mut stats = RunStats::start();
        stats.found = 10;
        stats.new = 7;
        stats.skipped = 3;
        stats.finish();

        store
            .record_run("rozee", ScrapeMode::Incremental, &stats)
            .unwrap();

        let runs = store.recent_runs(5).unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].site_name, "rozee");
        assert_eq!(runs[0].jobs_found, 10);
        assert_eq!(runs[0].jobs_new, 7);
        assert_eq!(runs[0].status, RunStatus::Success);
    }
}
