use regex::Regex;

use crate::normalize::clean;

/// Header that opens the employer blurb
pub const COMPANY_HEADER: &str = "COMPANY";
/// Header that opens the role summary
pub const POSITION_SUMMARY_HEADER: &str = "POSITION SUMMARY";

const COMMON_STOPS: [&str; 4] = ["RESPONSIBILITIES", "REQUIREMENTS", "QUALIFICATIONS", "ABOUT"];

/// Named sub-spans carved out of a cleaned description
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub company: Option<String>,
    pub position_summary: Option<String>,
}

/// Capture the text following `header` up to the first stop header or the
/// end of the description. Matching is case-insensitive.
///
/// Returns `None` if the header is absent or nothing follows it.
pub fn extract_section(description: &str, header: &str, stop_headers: &[&str]) -> Option<String> {
    let stops = stop_headers
        .iter()
        .map(|h| header_pattern(h))
        .collect::<Vec<_>>()
        .join("|");

    let pattern = if stops.is_empty() {
        format!(r"(?is)\b{}\b\s*:?\s*(.*)$", header_pattern(header))
    } else {
        format!(
            r"(?is)\b{}\b\s*:?\s*(.*?)(?:\b(?:{})\b|$)",
            header_pattern(header),
            stops
        )
    };

    let re = Regex::new(&pattern).ok()?;
    let captured = re.captures(description)?.get(1)?.as_str();
    clean(captured)
}

/// Split a cleaned description into its company and position-summary sections
pub fn split_sections(description: &str) -> Sections {
    let company_stops = stops_with(POSITION_SUMMARY_HEADER);
    let summary_stops = stops_with(COMPANY_HEADER);

    Sections {
        company: extract_section(description, COMPANY_HEADER, &company_stops),
        position_summary: extract_section(description, POSITION_SUMMARY_HEADER, &summary_stops),
    }
}

fn stops_with(complement: &'static str) -> Vec<&'static str> {
    let mut stops = COMMON_STOPS.to_vec();
    stops.push(complement);
    stops
}

/// Escape a header and let its words be separated by any whitespace
fn header_pattern(header: &str) -> String {
    header
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}
