use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::{first_match, Document};
use crate::job::WebsiteType;
use crate::normalize::tidy;

use super::{Site, SiteExtractor};

const TITLE_SELECTORS: &[&str] = &[
    "h1[data-testid='jobsearch-JobInfoHeader-title']",
    "[data-testid='jobsearch-JobInfoHeader-title']",
    "h1.jobsearch-JobInfoHeader-title",
    ".jobsearch-JobInfoHeader-title-container h1",
    "[class*='JobInfoHeader-title']",
    "h1",
];

const COMPANY_SELECTORS: &[&str] = &[
    "[data-testid='inlineHeader-companyName'] a",
    "[data-testid='inlineHeader-companyName']",
    "[data-company-name='true']",
    ".jobsearch-InlineCompanyRating-companyHeader a",
    ".jobsearch-InlineCompanyRating-companyHeader",
    ".jobsearch-CompanyInfoContainer a",
    "[class*='companyName']",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "#jobDescriptionText",
    "[data-testid='jobsearch-JobComponent-description']",
    ".jobsearch-jobDescriptionText",
    ".jobsearch-JobComponent-description",
    "[class*='jobDescription']",
    "article",
];

const FRESHNESS_SELECTORS: &[&str] = &[
    "[data-testid='myJobsStateDate']",
    "[data-testid='job-age']",
    ".jobsearch-HiringInsights-entry--age",
    ".jobsearch-JobMetadataFooter",
    "[class*='JobMetadataFooter']",
    "span.date",
    "[class*='date']",
];

/// Screen-reader suffix Indeed appends to the title heading
static JOB_POST_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*-\s*job\s+post\s*$").expect("Invalid job post suffix regex")
});

pub struct IndeedExtractor;

impl SiteExtractor for IndeedExtractor {
    fn site(&self) -> Site {
        Site::Indeed
    }

    fn website(&self, _url: &str) -> (WebsiteType, String) {
        (WebsiteType::Indeed, "Indeed".to_string())
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
        first_match(doc, TITLE_SELECTORS, |text| {
            let title = tidy(text)?;
            tidy(&JOB_POST_SUFFIX_RE.replace(&title, ""))
        })
    }
}
