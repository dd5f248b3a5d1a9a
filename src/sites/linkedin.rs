use crate::dom::{first_match, Document};
use crate::job::WebsiteType;
use crate::normalize::tidy;

use super::{Site, SiteExtractor};

const TITLE_SELECTORS: &[&str] = &[
    ".job-details-jobs-unified-top-card__job-title h1",
    ".job-details-jobs-unified-top-card__job-title",
    "h1.top-card-layout__title",
    "h1[data-test-id='job-title']",
    ".jobs-unified-top-card__job-title",
    ".topcard__title",
    "[class*='job-title']",
    "h1",
];

const COMPANY_SELECTORS: &[&str] = &[
    ".job-details-jobs-unified-top-card__company-name a",
    ".job-details-jobs-unified-top-card__company-name",
    ".jobs-unified-top-card__company-name a",
    ".jobs-unified-top-card__company-name",
    "a.topcard__org-name-link",
    ".topcard__flavor a",
    "[data-test-id='job-poster-name']",
    "[class*='company-name']",
];

const DESCRIPTION_SELECTORS: &[&str] = &[
    "#job-details",
    ".jobs-description__content .jobs-box__html-content",
    ".jobs-box__html-content",
    ".jobs-description-content__text",
    ".jobs-description__container",
    ".show-more-less-html__markup",
    ".description__text",
    "[data-test-id='job-description']",
    "[class*='jobs-description']",
    "article",
];

const FRESHNESS_SELECTORS: &[&str] = &[
    ".job-details-jobs-unified-top-card__primary-description-container",
    ".job-details-jobs-unified-top-card__tertiary-description-container",
    ".job-details-jobs-unified-top-card__primary-description",
    ".jobs-unified-top-card__posted-date",
    ".jobs-unified-top-card__subtitle-primary-grouping",
    "span.posted-time-ago__text",
    ".topcard__flavor--metadata",
    "[class*='posted-date']",
    "[class*='tvm__text']",
];

/// "Meet the hiring team" region, most specific first
const RECRUITER_SELECTORS: &[&str] = &[
    ".hirer-card__hirer-information .jobs-poster__name strong",
    ".hirer-card__hirer-information .jobs-poster__name",
    ".job-details-people-who-can-help__section--two-pane .jobs-poster__name",
    ".hirer-card__hirer-information a span[aria-hidden='true']",
    ".hirer-card__hirer-information strong",
    "[class*='hirer-card'] [class*='name']",
    ".message-the-recruiter .base-main-card__title",
    ".job-details-people-who-can-help__section strong",
    "[class*='hiring-team'] strong",
];

/// Section labels that show up where a name is expected
const RECRUITER_STOPWORDS: &[&str] = &["meet", "hiring", "team"];

pub struct LinkedInExtractor;

impl SiteExtractor for LinkedInExtractor {
    fn site(&self) -> Site {
        Site::LinkedIn
    }

    fn website(&self, _url: &str) -> (WebsiteType, String) {
        (WebsiteType::Linkedin, "LinkedIn".to_string())
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

    fn extract_recruiter_name(&self, doc: &dyn Document) -> Option<String> {
        first_match(doc, RECRUITER_SELECTORS, accept_recruiter)
    }
}

fn accept_recruiter(text: &str) -> Option<String> {
    let name = tidy(text)?;
    if name.chars().count() < 2 {
        return None;
    }
    let lower = name.to_lowercase();
    if RECRUITER_STOPWORDS.iter().any(|w| lower.contains(w)) {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    #[test]
    fn test_accept_recruiter() {
        assert_eq!(accept_recruiter("  Jane   Doe ").as_deref(), Some("Jane Doe"));
        assert_eq!(accept_recruiter("J"), None);
        assert_eq!(accept_recruiter("Meet the hiring team"), None);
        assert_eq!(accept_recruiter("Team lead"), None);
    }

    #[test]
    fn test_recruiter_skips_section_label() {
        let html = r#"<html><body>
            <div class="hirer-card__hirer-information">
                <strong>Meet the hiring team</strong>
                <strong>Priya Raman</strong>
            </div>
        </body></html>"#;

        let doc = HtmlDocument::parse(html);
        assert_eq!(
            LinkedInExtractor.extract_recruiter_name(&doc).as_deref(),
            Some("Priya Raman")
        );
    }

    #[test]
    fn test_no_hiring_team() {
        let doc = HtmlDocument::parse("<html><body><h1>Engineer</h1></body></html>");
        assert_eq!(LinkedInExtractor.extract_recruiter_name(&doc), None);
    }
}
