//! Extraction command: fetch or load a page, extract, validate, optionally save

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;

use jobscrape::config::Config;
use jobscrape::controller::{ExtractionController, HttpPage, RetrySettings, StaticPage};
use jobscrape::db::Database;
use jobscrape::error::Result;
use jobscrape::fetch;
use jobscrape::JobError;

use super::jobs::print_job;

/// Extract a job posting from `url` (or a saved copy of it)
pub fn cmd_extract(
    url: &str,
    file: Option<PathBuf>,
    save: bool,
    force: bool,
    no_wait: bool,
    json: bool,
) -> Result<()> {
    fetch::check_page_url(url)?;
    if save && Database::open()?.url_exists(url)? {
        return Err(JobError::DuplicateJob(url.to_string()));
    }

    let config = Config::load()?;
    let mut settings = RetrySettings::from(&config);
    if no_wait {
        settings.max_attempts = 1;
        settings.wait_timeout = Duration::ZERO;
    }

    let mut controller = ExtractionController::new(url, settings);

    if !json {
        println!("\nExtracting job ({} extractor)", controller.site());
        match file {
            Some(ref path) => println!("  Reading {}...\n", path.display()),
            None => println!("  Fetching {}...\n", url),
        }
    }

    let outcome = match file {
        Some(path) => {
            let content = fetch::read_html_file(&path, url)?;
            controller.run(&mut StaticPage::new(content.html))?
        }
        None => controller.run(&mut HttpPage::new(url, &config))?,
    };

    let should_save = save && (outcome.validation.valid || force);
    if should_save {
        let db = Database::open()?;
        db.insert_job(&outcome.record)?;
    }

    if json {
        let output = serde_json::json!({
            "record": outcome.record,
            "validation": outcome.validation,
            "attempts": outcome.attempts,
            "saved": should_save,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if controller.url() != url {
        println!("  Redirected to {}\n", controller.url().dimmed());
    }
    print_job(&outcome.record);
    println!();

    if outcome.validation.valid {
        println!(
            "  {} Complete record ({} attempt{})",
            "✓".green(),
            outcome.attempts,
            if outcome.attempts == 1 { "" } else { "s" }
        );
    } else {
        println!("  {} Incomplete record after {} attempt(s):", "✗".red(), outcome.attempts);
        for error in &outcome.validation.errors {
            println!("    - {}", error);
        }
    }

    if should_save {
        println!("  {} Saved", "✓".green());
    } else if save {
        println!(
            "  {} Not saved. Use {} to save an incomplete record.",
            "!".yellow(),
            "--force".yellow()
        );
    }

    Ok(())
}
