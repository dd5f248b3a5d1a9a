//! Saved job commands: list, show, comment, delete, export, init

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use colored::Colorize;
use inquire::Confirm;

use jobscrape::config::Config;
use jobscrape::db::Database;
use jobscrape::error::Result;
use jobscrape::export::{self, ExportFormat};
use jobscrape::job::JobRecord;
use jobscrape::JobError;

use crate::utils::{format_freshness, truncate_str};

/// Print a record as aligned key/value lines
pub fn print_job(job: &JobRecord) {
    let dash = || "-".dimmed().to_string();

    println!("  {}", job.job_role.as_deref().unwrap_or("(no title)").bold());
    println!("    Company:    {}", job.company_name.clone().unwrap_or_else(dash));
    println!("    Family:     {}", job.job_family);
    println!("    Site:       {} ({})", job.full_website, job.website_type);
    println!("    Posted:     {}", format_freshness(job.job_freshness));
    if let Some(ref recruiter) = job.recruiter_name {
        println!("    Recruiter:  {}", recruiter);
    }
    println!("    Extracted:  {}", job.extracted_at);
    println!("    URL:        {}", job.url);
    if let Some(ref section) = job.company_section {
        println!("    About:      {}", truncate_str(section, 100));
    }
    if let Some(ref summary) = job.position_summary {
        println!("    Summary:    {}", truncate_str(summary, 100));
    }
    match job.job_description {
        Some(ref description) => println!("    Details:    {}", truncate_str(description, 160)),
        None => println!("    Details:    {}", dash()),
    }
    if !job.comments.is_empty() {
        println!("    Comments:   {}", job.comments);
    }
}

/// List saved jobs
pub fn cmd_list(json: bool) -> Result<()> {
    let db = Database::open()?;
    let jobs = db.list_jobs()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&jobs)?);
        return Ok(());
    }

    if jobs.is_empty() {
        println!("No saved jobs. Run `jobscrape extract <url> --save` to add one.");
        return Ok(());
    }

    println!("\nSaved jobs ({}):\n", jobs.len());
    for job in &jobs {
        let title = truncate_str(job.job_role.as_deref().unwrap_or("(no title)"), 40);
        let company = truncate_str(job.company_name.as_deref().unwrap_or("-"), 25);
        println!(
            "  {:<40}  {:<25}  {:<12}  {}",
            title.bold(),
            company,
            format_freshness(job.job_freshness),
            job.url.dimmed()
        );
    }
    println!();
    Ok(())
}

/// Show a saved job
pub fn cmd_show(url: &str, json: bool) -> Result<()> {
    let db = Database::open()?;
    let job = db
        .get_job(url)?
        .ok_or_else(|| JobError::JobNotFound(url.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&job)?);
        return Ok(());
    }

    println!();
    print_job(&job);
    if let Some(ref description) = job.job_description {
        println!("\n{}", description);
    }
    Ok(())
}

/// Replace the comments on a saved job
pub fn cmd_comment(url: &str, text: &str) -> Result<()> {
    let db = Database::open()?;
    db.update_comments(url, text.trim())?;
    println!("Updated comments for {}", url);
    Ok(())
}

/// Delete a saved job
pub fn cmd_delete(url: &str, skip_confirm: bool) -> Result<()> {
    let db = Database::open()?;
    let job = db
        .get_job(url)?
        .ok_or_else(|| JobError::JobNotFound(url.to_string()))?;

    if !skip_confirm {
        let label = job.job_role.as_deref().unwrap_or(&job.url);
        let confirm = Confirm::new(&format!("Delete saved job '{}'?", label))
            .with_default(false)
            .prompt()
            .map_err(|e| JobError::ConfigError(e.to_string()))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    db.delete_job(&job.url)?;
    println!("Deleted job: {}", job.url);
    Ok(())
}

/// Export saved jobs to stdout or a file
pub fn cmd_export(format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let db = Database::open()?;
    let jobs = db.list_jobs()?;

    match output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            export::export(&jobs, format, writer)?;
            eprintln!(
                "Exported {} job(s) as {} to {}",
                jobs.len(),
                format.extension(),
                path.display()
            );
        }
        None => export::export(&jobs, format, io::stdout().lock())?,
    }
    Ok(())
}

/// Write the default configuration file
pub fn cmd_init(force: bool) -> Result<()> {
    let path = Config::config_path()?;
    if path.exists() && !force {
        println!("Configuration already exists at {}", path.display());
        println!("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    Config::default().save()?;
    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}
