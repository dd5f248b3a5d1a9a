use std::path::Path;

use tracing::debug;
use ureq::ResponseExt;
use url::Url;

use crate::config::Config;
use crate::error::{JobError, Result};

/// Raw page content ready to be parsed into a snapshot
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL after redirects
    pub url: String,
    /// Raw HTML content
    pub html: String,
}

/// Build an HTTP agent honouring the configured timeout
pub fn agent(config: &Config) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(config.timeout()))
        .build()
        .into()
}

/// Check that `raw` is an absolute http(s) page address
pub fn check_page_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(JobError::ExtractionFailed(format!(
            "unsupported URL scheme '{}': {}",
            scheme, raw
        ))),
    }
}

/// Fetch a page over HTTP (ureq)
pub fn fetch_http(agent: &ureq::Agent, url: &str, user_agent: &str) -> Result<PageContent> {
    debug!(url, "Fetching page");

    let response = agent
        .get(url)
        .header("User-Agent", user_agent)
        .header("Accept", "text/html,application/xhtml+xml")
        .call()?;
    let final_url = response.get_uri().to_string();
    let html = response.into_body().read_to_string()?;

    debug!(url = %final_url, bytes = html.len(), "Fetched page");
    Ok(PageContent {
        url: final_url,
        html,
    })
}

/// Read a page saved from a browser
pub fn read_html_file(path: &Path, url: &str) -> Result<PageContent> {
    let html = std::fs::read_to_string(path)?;
    Ok(PageContent {
        url: url.to_string(),
        html,
    })
}
