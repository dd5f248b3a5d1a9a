//! Site extractors - per-site selector cascades over a page snapshot
//!
//! Every variant shares the same pipeline (title, company, description,
//! freshness, sections, job family) through the default methods of
//! [`SiteExtractor`]; variants only supply their selector lists and override
//! the steps where their site needs something extra.

mod generic;
mod indeed;
mod linkedin;

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::dom::{first_match, Document};
use crate::freshness::infer_freshness_days;
use crate::job::{eastern_timestamp, JobFamily, JobRecord, WebsiteType};
use crate::metadata::looks_like_metadata;
use crate::normalize::{clean, tidy};
use crate::sections::split_sections;

pub use generic::GenericExtractor;
pub use indeed::IndeedExtractor;
pub use linkedin::LinkedInExtractor;

/// Descriptions shorter than this are page chrome, not job content
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Page-wide header regions searched for a posting date after the
/// site-specific metadata selectors
pub const HEADER_CONTAINER_SELECTORS: &[&str] = &[
    "header",
    "[class*='top-card']",
    "[class*='topcard']",
    "[class*='header']",
    "[class*='Header']",
    "[class*='posted']",
    "[class*='meta']",
    "time",
];

/// Which extractor variant handles a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Generic,
    LinkedIn,
    Indeed,
}

impl Site {
    /// Route a page URL to its site family
    pub fn from_url(url: &str) -> Self {
        let url = url.to_lowercase();
        if url.contains("linkedin.com") {
            Site::LinkedIn
        } else if url.contains("indeed.com") {
            Site::Indeed
        } else {
            Site::Generic
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Generic => write!(f, "generic"),
            Site::LinkedIn => write!(f, "linkedin"),
            Site::Indeed => write!(f, "indeed"),
        }
    }
}

/// Create the extractor for a page URL. Never fails: unknown sites get the
/// generic extractor.
pub fn create(url: &str) -> Box<dyn SiteExtractor> {
    match Site::from_url(url) {
        Site::LinkedIn => Box::new(LinkedInExtractor),
        Site::Indeed => Box::new(IndeedExtractor),
        Site::Generic => Box::new(GenericExtractor),
    }
}

/// Extracts a [`JobRecord`] from one family of job sites
pub trait SiteExtractor {
    fn site(&self) -> Site;

    /// Source-site category and human-readable label for `url`
    fn website(&self, url: &str) -> (WebsiteType, String);

    fn title_selectors(&self) -> &'static [&'static str];
    fn company_selectors(&self) -> &'static [&'static str];
    fn description_selectors(&self) -> &'static [&'static str];
    /// Metadata/header regions that carry the posting age
    fn freshness_selectors(&self) -> &'static [&'static str];

    fn extract_job_title(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, self.title_selectors(), tidy)
    }

    fn extract_company_name(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, self.company_selectors(), tidy)
    }

    fn extract_description(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, self.description_selectors(), accept_description)
    }

    /// Site metadata regions first, then page-wide headers, then the body
    fn extract_freshness(&self, doc: &dyn Document, _now: DateTime<Utc>) -> Option<u32> {
        freshness_from_selectors(doc, self.freshness_selectors())
            .or_else(|| freshness_from_selectors(doc, HEADER_CONTAINER_SELECTORS))
            .or_else(|| infer_freshness_days(&doc.body_text()))
    }

    /// Hiring-team contact; only LinkedIn exposes one
    fn extract_recruiter_name(&self, _doc: &dyn Document) -> Option<String> {
        None
    }

    fn extract_job_data(&self, doc: &dyn Document, url: &str) -> JobRecord {
        self.extract_job_data_at(doc, url, Utc::now())
    }

    /// Build a fresh record from the snapshot, stamped with `now`
    fn extract_job_data_at(&self, doc: &dyn Document, url: &str, now: DateTime<Utc>) -> JobRecord {
        let job_role = self.extract_job_title(doc);
        let company_name = self.extract_company_name(doc);
        let job_description = self.extract_description(doc);
        let sections = job_description
            .as_deref()
            .map(split_sections)
            .unwrap_or_default();
        let job_family = determine_job_family(
            job_role.as_deref().unwrap_or_default(),
            job_description.as_deref().unwrap_or_default(),
        );
        let (website_type, full_website) = self.website(url);

        let record = JobRecord {
            company_name,
            job_role,
            job_family,
            job_description,
            recruiter_name: self.extract_recruiter_name(doc),
            website_type,
            full_website,
            extracted_at: eastern_timestamp(now),
            job_freshness: self.extract_freshness(doc, now),
            url: url.to_string(),
            company_section: sections.company,
            position_summary: sections.position_summary,
            comments: String::new(),
        };

        info!(
            site = %self.site(),
            title = record.job_role.as_deref().unwrap_or("-"),
            company = record.company_name.as_deref().unwrap_or("-"),
            freshness = ?record.job_freshness,
            "Extracted job record"
        );
        record
    }
}

/// Classify a role by keyword, in fixed priority order
pub fn determine_job_family(title: &str, description: &str) -> JobFamily {
    let text = format!("{} {}", title, description).to_lowercase();

    if text.contains("mechanical") {
        JobFamily::MechanicalEngineer
    } else if text.contains("system") {
        JobFamily::SystemsEngineer
    } else if text.contains("project manager") || text.contains("program manager") {
        JobFamily::ProjectManager
    } else {
        JobFamily::Other
    }
}

/// Description candidate filter: reject chrome and short snippets, then clean
pub fn accept_description(text: &str) -> Option<String> {
    if looks_like_metadata(text) || text.chars().count() < MIN_DESCRIPTION_CHARS {
        return None;
    }
    clean(text)
}

/// First candidate text among `selectors` that yields a posting age
pub fn freshness_from_selectors(doc: &dyn Document, selectors: &[&str]) -> Option<u32> {
    first_match(doc, selectors, infer_freshness_days)
}
