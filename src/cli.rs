use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::export::ExportFormat;

#[derive(Parser)]
#[command(name = "jobscrape")]
#[command(author, version, about = "Extract, save and export job postings", long_about = None)]
#[command(after_help = r#"Examples:
  jobscrape extract "https://www.linkedin.com/jobs/view/123"         Extract and print a job
  jobscrape extract "https://www.indeed.com/viewjob?jk=1" --save     Extract and save it
  jobscrape extract "https://careers.acme.com/42" --file page.html   Use a page saved from the browser
  jobscrape list                                                    List saved jobs
  jobscrape export --format csv --output jobs.csv                   Export for a spreadsheet
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract a job posting from a page
    Extract {
        /// Page URL (also the key the job is saved under)
        url: String,

        /// Read the page from a saved HTML file instead of fetching it
        #[arg(long, value_name = "HTML")]
        file: Option<PathBuf>,

        /// Save the job to the local database
        #[arg(long)]
        save: bool,

        /// Save even if required fields are missing
        #[arg(long, requires = "save")]
        force: bool,

        /// Single attempt, no waiting for rendered content
        #[arg(long)]
        no_wait: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved jobs
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a saved job
    Show {
        /// Job URL
        url: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the comments on a saved job
    Comment {
        /// Job URL
        url: String,

        /// Comment text (replaces any existing comment)
        text: String,
    },

    /// Delete a saved job
    Delete {
        /// Job URL
        url: String,

        /// Skip confirmation
        #[arg(long, short)]
        yes: bool,
    },

    /// Export saved jobs
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },
}
