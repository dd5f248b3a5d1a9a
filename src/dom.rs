//! Document access and selector cascades
//!
//! Extractors never touch `scraper` directly. They query a [`Document`], which
//! keeps them testable against any page snapshot and mirrors the read-only
//! query-selector surface a browser page offers.

use once_cell::unsync::OnceCell;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::jsonld::{find_job_posting, JobPosting};

/// Elements whose text never reaches the reader
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that break a line in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol",
    "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

/// Read-only view of a page snapshot
pub trait Document {
    /// Text content of every element matching `selector`, in document order
    fn texts(&self, selector: &str) -> Vec<String>;

    /// Values of attribute `name` on every element matching `selector`
    fn attrs(&self, selector: &str, name: &str) -> Vec<String>;

    /// Text of the whole body (last-resort search space)
    fn body_text(&self) -> String;

    /// The page's schema.org `JobPosting`, if it embeds one
    fn job_posting(&self) -> Option<&JobPosting>;
}

/// A parsed HTML page
pub struct HtmlDocument {
    html: Html,
    posting: OnceCell<Option<JobPosting>>,
}

impl HtmlDocument {
    /// Parse a complete HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
            posting: OnceCell::new(),
        }
    }

    fn select_with<T>(&self, selector_str: &str, f: impl Fn(ElementRef<'_>) -> Option<T>) -> Vec<T> {
        match Selector::parse(selector_str) {
            Ok(selector) => self.html.select(&selector).filter_map(f).collect(),
            Err(e) => {
                warn!(selector = selector_str, error = ?e, "Invalid selector");
                Vec::new()
            }
        }
    }
}

impl Document for HtmlDocument {
    fn texts(&self, selector: &str) -> Vec<String> {
        self.select_with(selector, |el| Some(element_text(el)))
    }

    fn attrs(&self, selector: &str, name: &str) -> Vec<String> {
        self.select_with(selector, |el| el.value().attr(name).map(str::to_string))
    }

    fn body_text(&self) -> String {
        let texts = self.texts("body");
        if texts.is_empty() {
            element_text(self.html.root_element())
        } else {
            texts.join(" ")
        }
    }

    /// Parsed on first use, then shared by every fallback that asks
    fn job_posting(&self) -> Option<&JobPosting> {
        self.posting.get_or_init(|| find_job_posting(self)).as_ref()
    }
}

/// Rendered text of an element, like the DOM's `innerText`.
///
/// Inline markup joins without a gap (`C<b>++</b>` reads "C++"), block
/// elements are separated by whitespace, and script, style, noscript and
/// template contents are skipped. Whitespace is left for callers to collapse.
pub fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if HIDDEN_TAGS.contains(&name) {
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_text(child_el, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// Try `selectors` in order, and every matching element per selector, until
/// `accept` returns a value for a candidate with non-empty text.
///
/// Selector lists run from most specific (test ids, exact classes) to most
/// generic (substring class matches, bare tags); the first accepted candidate
/// wins.
pub fn first_match<T, F>(doc: &dyn Document, selectors: &[&str], mut accept: F) -> Option<T>
where
    F: FnMut(&str) -> Option<T>,
{
    for selector in selectors {
        for text in doc.texts(selector) {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            if let Some(value) = accept(text) {
                debug!(selector, "Selector matched");
                return Some(value);
            }
        }
    }
    None
}
