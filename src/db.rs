use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::Config;
use crate::error::{JobError, Result};
use crate::job::JobRecord;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

const JOB_COLUMNS: &str = "url, company_name, job_role, job_family, job_description, recruiter_name,
     website_type, full_website, extracted_at, job_freshness, company_section, position_summary, comments";

/// Database connection wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the configured location
    pub fn open() -> Result<Self> {
        Self::open_at(&Config::db_path()?)
    }

    /// Open or create the database at `db_path`
    pub fn open_at(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Self::init(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(mut conn: Connection) -> Result<Self> {
        embedded::migrations::runner().run(&mut conn)?;
        Ok(Self { conn })
    }

    // ========== Job operations ==========

    /// Insert a new job. Fails with `DuplicateJob` if its URL is already saved.
    pub fn insert_job(&self, job: &JobRecord) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO jobs (url, company_name, job_role, job_family, job_description, recruiter_name,
             website_type, full_website, extracted_at, job_freshness, company_section, position_summary,
             comments, saved_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                job.url,
                job.company_name,
                job.job_role,
                job.job_family.label(),
                job.job_description,
                job.recruiter_name,
                job.website_type.as_str(),
                job.full_website,
                job.extracted_at,
                job.job_freshness,
                job.company_section,
                job.position_summary,
                job.comments,
                Utc::now().timestamp(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(JobError::DuplicateJob(job.url.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a job with this URL is already saved
    pub fn url_exists(&self, url: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM jobs WHERE url = ?1",
            params![url],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Get a job by URL
    pub fn get_job(&self, url: &str) -> Result<Option<JobRecord>> {
        let job = self
            .conn
            .query_row(
                &format!("SELECT {} FROM jobs WHERE url = ?1", JOB_COLUMNS),
                params![url],
                row_to_job,
            )
            .optional()?;
        Ok(job)
    }

    /// List all saved jobs, newest first
    pub fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM jobs ORDER BY saved_at DESC, rowid DESC",
            JOB_COLUMNS
        ))?;
        let jobs = stmt
            .query_map([], row_to_job)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(jobs)
    }

    /// Replace the free-text comments on a saved job
    pub fn update_comments(&self, url: &str, comments: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE jobs SET comments = ?1 WHERE url = ?2",
            params![comments, url],
        )?;
        if changed == 0 {
            return Err(JobError::JobNotFound(url.to_string()));
        }
        Ok(())
    }

    /// Delete a job by URL
    pub fn delete_job(&self, url: &str) -> Result<()> {
        let changed = self.conn.execute("DELETE FROM jobs WHERE url = ?1", params![url])?;
        if changed == 0 {
            return Err(JobError::JobNotFound(url.to_string()));
        }
        Ok(())
    }
}

fn row_to_job(row: &Row<'_>) -> rusqlite::Result<JobRecord> {
    let job_family: String = row.get(3)?;
    let website_type: String = row.get(6)?;

    Ok(JobRecord {
        url: row.get(0)?,
        company_name: row.get(1)?,
        job_role: row.get(2)?,
        job_family: job_family.parse().unwrap_or_default(),
        job_description: row.get(4)?,
        recruiter_name: row.get(5)?,
        website_type: website_type.parse().unwrap_or_default(),
        full_website: row.get(7)?,
        extracted_at: row.get(8)?,
        job_freshness: row.get(9)?,
        company_section: row.get(10)?,
        position_summary: row.get(11)?,
        comments: row.get(12)?,
    })
}
