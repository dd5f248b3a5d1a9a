//! schema.org `JobPosting` structured data
//!
//! Many applicant-tracking systems embed a JSON-LD `JobPosting` even when
//! their markup has no stable classes. The generic extractor consults it only
//! after its selector cascades come up empty, through the per-document cache
//! behind [`Document::job_posting`].

use scraper::Html;
use serde_json::Value;

use crate::dom::{element_text, Document};
use crate::normalize::tidy;

const JSONLD_SELECTOR: &str = r#"script[type="application/ld+json"]"#;

/// Fields of interest from a `JobPosting` block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    /// Plain text; HTML markup in the source is stripped
    pub description: Option<String>,
    pub date_posted: Option<String>,
}

/// Find the first `JobPosting` in the page's JSON-LD scripts
pub fn find_job_posting(doc: &dyn Document) -> Option<JobPosting> {
    doc.texts(JSONLD_SELECTOR)
        .iter()
        .filter_map(|text| serde_json::from_str::<Value>(text.trim()).ok())
        .find_map(|json| find_in_value(&json))
}

fn find_in_value(json: &Value) -> Option<JobPosting> {
    match json {
        Value::Object(map) => {
            if let Some(Value::Array(graph)) = map.get("@graph") {
                return graph.iter().find_map(find_in_value);
            }
            if is_job_posting(json) {
                Some(to_posting(json))
            } else {
                None
            }
        }
        Value::Array(items) => items.iter().find_map(find_in_value),
        _ => None,
    }
}

/// Handles plain, namespaced ("schema:JobPosting") and array `@type` values
fn is_job_posting(json: &Value) -> bool {
    let matches = |s: &str| {
        let name = s.rsplit_once(':').map(|(_, t)| t).unwrap_or(s);
        name.eq_ignore_ascii_case("JobPosting")
    };

    match json.get("@type") {
        Some(Value::String(s)) => matches(s.as_str()),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

fn to_posting(json: &Value) -> JobPosting {
    let company = match json.get("hiringOrganization") {
        Some(Value::String(s)) => tidy(s),
        Some(org) => org.get("name").and_then(Value::as_str).and_then(tidy),
        None => None,
    };

    JobPosting {
        title: json.get("title").and_then(Value::as_str).and_then(tidy),
        company,
        description: json
            .get("description")
            .and_then(Value::as_str)
            .and_then(html_to_text),
        date_posted: json.get("datePosted").and_then(Value::as_str).and_then(tidy),
    }
}

/// Descriptions are usually HTML-encoded fragments
fn html_to_text(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    tidy(&element_text(fragment.root_element()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlDocument;

    #[test]
    fn test_find_job_posting() {
        let html = r#"<html><head>
            <script type="application/ld+json">
            {"@context": "https://schema.org", "@type": "JobPosting",
             "title": "Controls Engineer",
             "hiringOrganization": {"@type": "Organization", "name": "Acme Robotics"},
             "datePosted": "2024-03-10",
             "description": "<p>Design <b>PLC</b> logic.</p><ul><li>Commission lines</li></ul>"}
            </script></head><body></body></html>"#;

        let posting = find_job_posting(&HtmlDocument::parse(html)).unwrap();
        assert_eq!(posting.title.as_deref(), Some("Controls Engineer"));
        assert_eq!(posting.company.as_deref(), Some("Acme Robotics"));
        assert_eq!(posting.date_posted.as_deref(), Some("2024-03-10"));
        let description = posting.description.unwrap();
        assert!(description.contains("Design PLC logic."));
        assert!(!description.contains('<'));
    }

    #[test]
    fn test_graph_and_namespaced_type() {
        let html = r#"<script type="application/ld+json">
            {"@graph": [{"@type": "WebPage"}, {"@type": ["schema:JobPosting"], "title": "Planner",
              "hiringOrganization": "Globex"}]}
            </script>"#;

        let posting = find_job_posting(&HtmlDocument::parse(html)).unwrap();
        assert_eq!(posting.title.as_deref(), Some("Planner"));
        assert_eq!(posting.company.as_deref(), Some("Globex"));
    }

    #[test]
    fn test_no_job_posting() {
        let html = r#"<script type="application/ld+json">{"@type": "Product", "name": "Widget"}</script>
            <script type="application/ld+json">not json</script>"#;
        assert_eq!(find_job_posting(&HtmlDocument::parse(html)), None);
    }
}
