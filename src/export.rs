//! Export saved jobs as JSON or CSV

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::job::JobRecord;

/// Output format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Flat CSV row; optional fields become empty cells
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CsvRow<'a> {
    company_name: &'a str,
    job_role: &'a str,
    job_family: &'a str,
    job_description: &'a str,
    recruiter_name: &'a str,
    website_type: &'a str,
    full_website: &'a str,
    extracted_at: &'a str,
    job_freshness: Option<u32>,
    url: &'a str,
    company_section: &'a str,
    position_summary: &'a str,
    comments: &'a str,
}

impl<'a> From<&'a JobRecord> for CsvRow<'a> {
    fn from(job: &'a JobRecord) -> Self {
        Self {
            company_name: job.company_name.as_deref().unwrap_or_default(),
            job_role: job.job_role.as_deref().unwrap_or_default(),
            job_family: job.job_family.label(),
            job_description: job.job_description.as_deref().unwrap_or_default(),
            recruiter_name: job.recruiter_name.as_deref().unwrap_or_default(),
            website_type: job.website_type.as_str(),
            full_website: &job.full_website,
            extracted_at: &job.extracted_at,
            job_freshness: job.job_freshness,
            url: &job.url,
            company_section: job.company_section.as_deref().unwrap_or_default(),
            position_summary: job.position_summary.as_deref().unwrap_or_default(),
            comments: &job.comments,
        }
    }
}

/// Write records in the requested format
pub fn export<W: Write>(jobs: &[JobRecord], format: ExportFormat, writer: W) -> Result<()> {
    match format {
        ExportFormat::Json => export_json(jobs, writer),
        ExportFormat::Csv => export_csv(jobs, writer),
    }
}

/// Pretty-printed JSON array
pub fn export_json<W: Write>(jobs: &[JobRecord], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, jobs)?;
    writeln!(writer)?;
    Ok(())
}

/// CSV with a header row of record field names
pub fn export_csv<W: Write>(jobs: &[JobRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if jobs.is_empty() {
        csv_writer.write_record(CSV_HEADERS)?;
    }
    for job in jobs {
        csv_writer.serialize(CsvRow::from(job))?;
    }
    csv_writer.flush()?;
    Ok(())
}

const CSV_HEADERS: [&str; 13] = [
    "companyName",
    "jobRole",
    "jobFamily",
    "jobDescription",
    "recruiterName",
    "websiteType",
    "fullWebsite",
    "extractedAt",
    "jobFreshness",
    "url",
    "companySection",
    "positionSummary",
    "comments",
];
