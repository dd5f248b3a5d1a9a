//! jobscrape - extract job postings into structured records

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jobscrape::cli::{Cli, Commands};
use jobscrape::error::Result;

mod commands;
mod utils;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("JOBSCRAPE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            url,
            file,
            save,
            force,
            no_wait,
            json,
        } => commands::cmd_extract(&url, file, save, force, no_wait, json),

        Commands::List { json } => commands::cmd_list(json),
        Commands::Show { url, json } => commands::cmd_show(&url, json),
        Commands::Comment { url, text } => commands::cmd_comment(&url, &text),
        Commands::Delete { url, yes } => commands::cmd_delete(&url, yes),
        Commands::Export { format, output } => commands::cmd_export(format, output),
        Commands::Init { force } => commands::cmd_init(force),
    }
}
