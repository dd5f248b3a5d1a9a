//! Extraction controller - owns the active extractor and drives retries
//!
//! Pages that render client-side may not have their job content in the first
//! snapshot. The controller polls for "content ready" selectors, runs the
//! active extractor, validates, and retries the whole record a bounded number
//! of times. Each attempt builds a fresh record.

use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::dom::{Document, HtmlDocument};
use crate::error::{JobError, Result};
use crate::fetch;
use crate::job::JobRecord;
use crate::sites::{self, Site, SiteExtractor};
use crate::validate::{validate, ValidationResult};

/// Somewhere a page snapshot can be (re)taken from
pub trait PageSource {
    /// Take a snapshot of the page as it is now
    fn snapshot(&mut self) -> Result<HtmlDocument>;

    /// Whether later snapshots can differ from earlier ones
    fn is_live(&self) -> bool {
        true
    }

    /// Address of the last snapshot, when the source can tell (redirects)
    fn current_url(&self) -> Option<&str> {
        None
    }
}

/// Fixed HTML, e.g. a page saved from the browser
pub struct StaticPage {
    html: String,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl PageSource for StaticPage {
    fn snapshot(&mut self) -> Result<HtmlDocument> {
        Ok(HtmlDocument::parse(&self.html))
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// A page re-fetched over HTTP for every snapshot
pub struct HttpPage {
    agent: ureq::Agent,
    url: String,
    user_agent: String,
    final_url: Option<String>,
}

impl HttpPage {
    pub fn new(url: &str, config: &Config) -> Self {
        Self {
            agent: fetch::agent(config),
            url: url.to_string(),
            user_agent: config.user_agent.clone(),
            final_url: None,
        }
    }
}

impl PageSource for HttpPage {
    fn snapshot(&mut self) -> Result<HtmlDocument> {
        let content = fetch::fetch_http(&self.agent, &self.url, &self.user_agent)?;
        let doc = HtmlDocument::parse(&content.html);
        self.final_url = Some(content.url);
        Ok(doc)
    }

    fn current_url(&self) -> Option<&str> {
        self.final_url.as_deref()
    }
}

/// Retry and polling budget
#[derive(Debug, Clone)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub poll_interval: Duration,
    pub wait_timeout: Duration,
    pub ready_selectors: Vec<String>,
}

impl From<&Config> for RetrySettings {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            retry_delay: config.retry_delay(),
            poll_interval: config.poll_interval(),
            wait_timeout: config.wait_timeout(),
            ready_selectors: config.ready_selectors.clone(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// A record together with its validation verdict
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub record: JobRecord,
    pub validation: ValidationResult,
    /// Attempts used to produce this record
    pub attempts: u32,
}

/// Returns true once any ready selector matches an element with text
pub fn content_ready(doc: &dyn Document, ready_selectors: &[String]) -> bool {
    ready_selectors.is_empty()
        || ready_selectors
            .iter()
            .any(|s| doc.texts(s).iter().any(|t| !t.trim().is_empty()))
}

/// Poll `source` until its content is ready or the wait times out.
///
/// On timeout the last snapshot is returned so extraction can still make a
/// best effort. Static sources are snapshotted once.
pub fn wait_for_content(source: &mut dyn PageSource, settings: &RetrySettings) -> Result<HtmlDocument> {
    let started = Instant::now();
    let mut polls = 0u32;

    loop {
        let doc = source.snapshot()?;
        polls += 1;

        if !source.is_live() || content_ready(&doc, &settings.ready_selectors) {
            debug!(polls, "Content ready");
            return Ok(doc);
        }
        if started.elapsed() >= settings.wait_timeout {
            debug!(polls, "Timed out waiting for content");
            return Ok(doc);
        }
        thread::sleep(settings.poll_interval);
    }
}

/// Owns the extractor for the page currently being looked at
pub struct ExtractionController {
    url: String,
    extractor: Box<dyn SiteExtractor>,
    settings: RetrySettings,
    retry_count: u32,
}

impl ExtractionController {
    pub fn new(url: &str, settings: RetrySettings) -> Self {
        Self {
            url: url.to_string(),
            extractor: sites::create(url),
            settings,
            retry_count: 0,
        }
    }

    /// Point the controller at a new page (e.g. after in-app navigation)
    pub fn reinitialize(&mut self, url: &str) {
        debug!(from = %self.url, to = url, "Reinitializing extractor");
        self.url = url.to_string();
        self.extractor = sites::create(url);
        self.retry_count = 0;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn site(&self) -> Site {
        self.extractor.site()
    }

    /// Failed attempts since the last valid record
    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// Extract and validate a single snapshot, without retries
    pub fn extract_once(&self, doc: &dyn Document) -> ExtractionOutcome {
        let record = self.extractor.extract_job_data(doc, &self.url);
        let validation = validate(&record);
        ExtractionOutcome {
            record,
            validation,
            attempts: 1,
        }
    }

    /// Switch extractors when the source ended up somewhere else
    fn follow_navigation(&mut self, source: &dyn PageSource) {
        if let Some(current) = source.current_url() {
            if current != self.url {
                info!(from = %self.url, to = current, "Page navigated");
                self.reinitialize(current);
            }
        }
    }

    /// Run whole-record attempts until one validates or the budget is spent.
    ///
    /// Snapshot failures are logged and count as attempts. When the budget
    /// runs out the last record is returned even though it is invalid; only
    /// if no attempt produced a record at all is an error returned.
    pub fn run(&mut self, source: &mut dyn PageSource) -> Result<ExtractionOutcome> {
        let max_attempts = self.settings.max_attempts.max(1);
        let mut best_effort: Option<ExtractionOutcome> = None;
        let mut last_error: Option<String> = None;

        for attempt in 1..=max_attempts {
            match wait_for_content(source, &self.settings) {
                Ok(doc) => {
                    self.follow_navigation(source);
                    let mut outcome = self.extract_once(&doc);
                    outcome.attempts = attempt;

                    if outcome.validation.valid {
                        info!(attempt, url = %self.url, "Extracted valid job record");
                        self.retry_count = 0;
                        return Ok(outcome);
                    }

                    self.retry_count += 1;
                    warn!(attempt, errors = ?outcome.validation.errors, "Extracted record is incomplete");
                    best_effort = Some(outcome);
                }
                Err(e) => {
                    self.retry_count += 1;
                    warn!(attempt, error = %e, "Extraction attempt failed");
                    last_error = Some(e.to_string());
                }
            }

            if !source.is_live() {
                break;
            }
            if attempt < max_attempts {
                thread::sleep(self.settings.retry_delay);
            }
        }

        best_effort.ok_or_else(|| {
            JobError::ExtractionFailed(last_error.unwrap_or_else(|| "no attempt produced a record".into()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    const COMPLETE: &str = r#"<html><body>
        <h1 class="job-title">Reliability Engineer</h1>
        <div class="company-name">Acme Turbines</div>
        <div class="job-description">We need a reliability engineer to analyse field failures
            and drive corrective actions across our gas turbine fleet.</div>
    </body></html>"#;

    const LOADING: &str = r#"<html><body><div class="spinner">Loading</div></body></html>"#;

    /// Replays a scripted sequence of snapshots, repeating the last one
    struct ScriptedPage {
        frames: VecDeque<std::result::Result<&'static str, &'static str>>,
        taken: u32,
        url: Option<&'static str>,
    }

    impl ScriptedPage {
        fn new(frames: Vec<std::result::Result<&'static str, &'static str>>) -> Self {
            Self {
                frames: frames.into(),
                taken: 0,
                url: None,
            }
        }
    }

    impl PageSource for ScriptedPage {
        fn snapshot(&mut self) -> Result<HtmlDocument> {
            self.taken += 1;
            let frame = if self.frames.len() > 1 {
                self.frames.pop_front()
            } else {
                self.frames.front().cloned()
            };
            match frame.expect("script must not be empty") {
                Ok(html) => Ok(HtmlDocument::parse(html)),
                Err(message) => Err(JobError::ExtractionFailed(message.to_string())),
            }
        }

        fn current_url(&self) -> Option<&str> {
            self.url
        }
    }

    fn fast_settings(max_attempts: u32) -> RetrySettings {
        RetrySettings {
            max_attempts,
            retry_delay: Duration::ZERO,
            poll_interval: Duration::ZERO,
            wait_timeout: Duration::from_secs(5),
            ready_selectors: vec!["[class*='job-description']".to_string()],
        }
    }

    #[test]
    fn test_reinitialize_switches_extractor() {
        let mut controller = ExtractionController::new("https://www.indeed.com/viewjob?jk=1", fast_settings(3));
        assert_eq!(controller.site(), Site::Indeed);

        controller.reinitialize("https://www.linkedin.com/jobs/view/42");
        assert_eq!(controller.site(), Site::LinkedIn);
        assert_eq!(controller.url(), "https://www.linkedin.com/jobs/view/42");
        assert_eq!(controller.retry_count(), 0);
    }

    #[test]
    fn test_wait_polls_until_ready() {
        let mut page = ScriptedPage::new(vec![Ok(LOADING), Ok(LOADING), Ok(COMPLETE)]);
        let doc = wait_for_content(&mut page, &fast_settings(1)).unwrap();
        assert_eq!(page.taken, 3);
        assert!(content_ready(&doc, &fast_settings(1).ready_selectors));
    }

    #[test]
    fn test_wait_times_out_with_last_snapshot() {
        let mut settings = fast_settings(1);
        settings.wait_timeout = Duration::ZERO;
        let mut page = ScriptedPage::new(vec![Ok(LOADING)]);
        let doc = wait_for_content(&mut page, &settings).unwrap();
        assert_eq!(page.taken, 1);
        assert!(!content_ready(&doc, &settings.ready_selectors));
    }

    #[test]
    fn test_run_retries_after_failures() {
        let mut settings = fast_settings(3);
        settings.wait_timeout = Duration::ZERO;
        let mut page = ScriptedPage::new(vec![Err("page context gone"), Ok(LOADING), Ok(COMPLETE)]);
        let mut controller = ExtractionController::new("https://careers.acme.com/jobs/9", settings);

        let outcome = controller.run(&mut page).unwrap();
        assert!(outcome.validation.valid);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(outcome.record.job_role.as_deref(), Some("Reliability Engineer"));
        assert_eq!(controller.retry_count(), 0);
    }

    #[test]
    fn test_run_returns_best_effort_when_budget_spent() {
        let mut settings = fast_settings(2);
        settings.wait_timeout = Duration::ZERO;
        let mut page = ScriptedPage::new(vec![Ok(LOADING)]);
        let mut controller = ExtractionController::new("https://careers.acme.com/jobs/9", settings);

        let outcome = controller.run(&mut page).unwrap();
        assert!(!outcome.validation.valid);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(controller.retry_count(), 2);
    }

    #[test]
    fn test_run_errors_when_every_attempt_fails() {
        let mut page = ScriptedPage::new(vec![Err("page context gone")]);
        let mut controller = ExtractionController::new("https://careers.acme.com/jobs/9", fast_settings(2));

        match controller.run(&mut page) {
            Err(JobError::ExtractionFailed(message)) => {
                assert!(message.contains("page context gone"));
            }
            other => panic!("expected extraction failure, got {:?}", other.map(|o| o.attempts)),
        }
    }

    #[test]
    fn test_static_page_is_tried_once() {
        let mut page = StaticPage::new(LOADING);
        let mut controller = ExtractionController::new("https://careers.acme.com/jobs/9", fast_settings(3));
        let outcome = controller.run(&mut page).unwrap();
        assert_eq!(outcome.attempts, 1);
        assert!(!outcome.validation.valid);
    }

    #[test]
    fn test_run_follows_redirect_to_another_site() {
        let mut page = ScriptedPage::new(vec![Ok(COMPLETE)]);
        page.url = Some("https://www.indeed.com/viewjob?jk=9");
        let mut controller = ExtractionController::new("https://example.com/apply/9", fast_settings(1));
        assert_eq!(controller.site(), Site::Generic);

        let outcome = controller.run(&mut page).unwrap();
        assert_eq!(controller.site(), Site::Indeed);
        assert_eq!(controller.url(), "https://www.indeed.com/viewjob?jk=9");
        assert_eq!(outcome.record.url, "https://www.indeed.com/viewjob?jk=9");
        assert_eq!(outcome.record.full_website, "Indeed");
    }

    #[test]
    fn test_run_keeps_extractor_when_url_unchanged() {
        let mut page = ScriptedPage::new(vec![Ok(COMPLETE)]);
        page.url = Some("https://careers.acme.com/jobs/9");
        let mut controller = ExtractionController::new("https://careers.acme.com/jobs/9", fast_settings(1));

        let outcome = controller.run(&mut page).unwrap();
        assert!(outcome.validation.valid);
        assert_eq!(controller.site(), Site::Generic);
    }
}
