//! Database schema definitions

/// SQL schema for the jobs database
pub const SCHEMA_SQL: &str = r#"
-- Canonical job postings; identity is the source URL
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_url TEXT NOT NULL UNIQUE,
    site_source TEXT NOT NULL,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT,
    city TEXT,
    country TEXT NOT NULL DEFAULT 'Pakistan',
    salary_text TEXT,
    salary_min INTEGER,
    salary_max INTEGER,
    salary_currency TEXT NOT NULL DEFAULT 'PKR',
    description TEXT,
    skills TEXT NOT NULL DEFAULT '[]',
    experience_level TEXT NOT NULL DEFAULT 'Not Specified',
    job_type TEXT,
    is_remote INTEGER NOT NULL DEFAULT 0,
    is_hybrid INTEGER NOT NULL DEFAULT 0,
    is_onsite INTEGER NOT NULL DEFAULT 1,
    posted_date TEXT,
    deadline_date TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL,
    last_updated TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_jobs_site ON jobs(site_source);
CREATE INDEX IF NOT EXISTS idx_jobs_city ON jobs(city);
CREATE INDEX IF NOT EXISTS idx_jobs_url ON jobs(source_url);

-- One row per pipeline run
CREATE TABLE IF NOT EXISTS scrape_logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    site_name TEXT NOT NULL,
    scrape_mode TEXT NOT NULL,
    started_at TEXT NOT NULL,
    completed_at TEXT NOT NULL,
    jobs_found INTEGER NOT NULL,
    jobs_new INTEGER NOT NULL,
    jobs_updated INTEGER NOT NULL,
    jobs_skipped INTEGER NOT NULL,
    errors INTEGER NOT NULL,
    status TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scrape_logs_site ON scrape_logs(site_name);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
