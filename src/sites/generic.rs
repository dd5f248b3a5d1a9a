use chrono::{DateTime, Utc};
use url::Url;

use crate::dom::{first_match, Document};
use crate::freshness::{days_since, infer_freshness_days};
use crate::job::WebsiteType;
use crate::normalize::{clean, tidy};

use super::{
    accept_description, freshness_from_selectors, Site, SiteExtractor,
    HEADER_CONTAINER_SELECTORS, MIN_DESCRIPTION_CHARS,
};

const TITLE_SELECTORS: &[&str] = &[
    "[data-testid*='job-title']",
    "[data-automation-id='jobPostingHeader']",
    "[class*='job-title']",
    "[class*='jobTitle']",
    "[class*='posting-headline'] h2",
    ".app-title",
    "h1[class*='title']",
    "h1",
    "[class*='title']",
];

const COMPANY_SELECTORS: &[&str] = &[
    "[data-testid*='company']",
    "[class*='company-name']",
    "[class*='companyName']",
    ".company",
    "[class*='employer']",
    "[class*='company']",
    "[class*='organization']",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "[data-automation-id='jobPostingDescription']",
    "[class*='job-description']",
    "[class*='jobDescription']",
    "[id*='job-description']",
    "#content .section-wrapper",
    "[class*='description']",
    "[class*='posting']",
    "[class*='content']",
    "main",
    "article",
];

const FRESHNESS_SELECTORS: &[&str] = &[
    "[data-automation-id='postedOn']",
    "[class*='posted']",
    "[class*='Posted']",
    "[class*='date']",
    "time",
];

/// Host or path fragments that mark an employer's own careers site
const CAREERS_MARKERS: &[&str] = &[
    "careers", "career", "jobs", "greenhouse", "lever.co", "workday", "myworkdayjobs",
    "ashbyhq", "smartrecruiters", "icims", "recruiting",
];

/// Fallback extractor for company career pages and unknown job boards.
///
/// After its selector cascades it falls back to schema.org `JobPosting` data,
/// and to `og:site_name` for the employer.
pub struct GenericExtractor;

impl SiteExtractor for GenericExtractor {
    fn site(&self) -> Site {
        Site::Generic
    }

    fn website(&self, url: &str) -> (WebsiteType, String) {
        let Ok(parsed) = Url::parse(url) else {
            return (WebsiteType::Other, url.to_string());
        };
        let host = parsed.host_str().unwrap_or_default().to_string();
        let haystack = format!("{}{}", host, parsed.path()).to_lowercase();

        let website_type = if CAREERS_MARKERS.iter().any(|m| haystack.contains(m)) {
            WebsiteType::Company
        } else {
            WebsiteType::Other
        };

        let label = if host.is_empty() { url.to_string() } else { host };
        (website_type, label)
    }

    fn title_selectors(&self) -> &'static [&'static str] {
        TITLE_SELECTORS
    }

    fn company_selectors(&self) -> &'static [&'static str] {
        COMPANY_SELECTORS
    }

    fn description_selectors(&self) -> &'static [&'static str] {
        DESCRIPTION_SELECTORS
    }

    fn freshness_selectors(&self) -> &'static [&'static str] {
        FRESHNESS_SELECTORS
    }

    fn extract_job_title(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, TITLE_SELECTORS, tidy)
            .or_else(|| doc.job_posting().and_then(|p| p.title.clone()))
    }

    fn extract_company_name(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, COMPANY_SELECTORS, tidy)
            .or_else(|| doc.job_posting().and_then(|p| p.company.clone()))
            .or_else(|| {
                doc.attrs("meta[property='og:site_name']", "content")
                    .iter()
                    .find_map(|name| tidy(name))
            })
    }

    fn extract_description(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, DESCRIPTION_SELECTORS, accept_description).or_else(|| {
            doc.job_posting()
                .and_then(|p| p.description.as_deref())
                .filter(|d| d.chars().count() >= MIN_DESCRIPTION_CHARS)
                .and_then(clean)
        })
    }

    fn extract_freshness(&self, doc: &dyn Document, now: DateTime<Utc>) -> Option<u32> {
        freshness_from_selectors(doc, FRESHNESS_SELECTORS)
            .or_else(|| freshness_from_selectors(doc, HEADER_CONTAINER_SELECTORS))
            .or_else(|| {
                doc.job_posting()
                    .and_then(|p| p.date_posted.as_deref())
                    .and_then(|date| days_since(date, now))
            })
            .or_else(|| infer_freshness_days(&doc.body_text()))
    }
}
