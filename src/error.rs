use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] refinery::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Job already saved: {0}")]
    DuplicateJob(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl JobError {
    /// Get an actionable hint for how to resolve this error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            JobError::HttpError(_) => Some(
                "Check your internet connection, or save the page and run:\n  jobscrape extract <url> --file page.html"
            ),
            JobError::UrlParseError(_) => Some(
                "Pass the full page address, including https://"
            ),
            JobError::DuplicateJob(_) => Some(
                "Run `jobscrape show <url>` to see the saved record"
            ),
            JobError::JobNotFound(_) => Some(
                "Run `jobscrape list` to see saved jobs"
            ),
            JobError::ExtractionFailed(_) => Some(
                "The page may need more time to render. Try saving it from your browser and passing --file"
            ),
            JobError::DatabaseError(_) | JobError::MigrationError(_) => Some(
                "Set JOBSCRAPE_DB to a writable path, or delete the database file to start fresh"
            ),
            JobError::TomlError(_) | JobError::ConfigError(_) => Some(
                "Regenerate the default configuration with `jobscrape init --force`"
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, JobError>;
