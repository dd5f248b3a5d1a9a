//! Metadata classification - tell page chrome apart from description content
//!
//! Description selectors on job boards regularly land on the top-card line
//! ("Toronto, ON · 2 weeks ago · Over 100 applicants") instead of the body.
//! These patterns recognise that chrome so the cascade can move on.

use once_cell::sync::Lazy;
use regex::Regex;

const RELATIVE_UNIT: &str = r"(?:minute|min|hour|hr|day|week|wk|month|mo)s?";

/// Patterns that can only sit at the start of the text
static LEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let patterns = [
        // Bare relative date at the start: "3 days ago", "Posted 2 weeks ago"
        format!(r"(?i)^\s*(?:reposted\s+|posted\s+)?\d+\+?\s*{}\s+ago\b", RELATIVE_UNIT),
        r"(?i)^\s*(?:posted\s+)?(?:today|yesterday|just\s+posted)\b\s*(?:·|$)".to_string(),
    ];
    compile(&patterns)
});

/// `·`-separated badges; only checked on text shaped like a top-card line
static BADGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let patterns = [
        // "Toronto, ON · 2 weeks ago"
        format!(r"(?i)[\w\s,.'-]+\s*·\s*(?:reposted\s+|posted\s+)?\d+\+?\s*{}\s+ago", RELATIVE_UNIT),
        // "· Over 100 applicants", "· 37 applicants"
        r"(?i)·\s*(?:over\s+)?\d+\+?\s+(?:applicants?|people\s+clicked\s+apply)".to_string(),
        // Employment type and hiring status badges
        r"(?i)·\s*(?:remote|hybrid|on-site|onsite|full-time|part-time|contract|temporary|internship|actively\s+reviewing|actively\s+recruiting|reposted|promoted)\b".to_string(),
    ];
    compile(&patterns)
});

/// Longest `·` segment, in words, still read as a badge
const MAX_BADGE_WORDS: usize = 8;

fn compile(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid metadata regex pattern"))
        .collect()
}

/// "<words>, <2-letter region> ·" at the very start. Case-sensitive on purpose
/// so ordinary sentences ("Work with us, we ·") are not caught.
static LOCATION_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[\p{L}][\p{L}\s.'-]*,\s*[A-Z]{2}\s*·").expect("Invalid location regex pattern")
});

/// Returns true if `text` looks like page metadata rather than job content
pub fn looks_like_metadata(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    if LOCATION_PREFIX_RE.is_match(text) {
        return true;
    }

    if LEADING_PATTERNS.iter().any(|re| re.is_match(text)) {
        return true;
    }

    is_badge_line(text) && BADGE_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Every `·` segment is a few words, as in "Toronto, ON · Remote · Full-time".
/// Prose that happens to contain a `·` has at least one sentence-length segment.
fn is_badge_line(text: &str) -> bool {
    text.contains('·')
        && text
            .split('·')
            .all(|segment| segment.split_whitespace().count() <= MAX_BADGE_WORDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTION: &str = "We are looking for a mechanical engineer to design and validate \
        hydraulic components for our off-highway vehicle line. You will work closely with \
        manufacturing and quality teams to bring new products to market.";

    #[test]
    fn test_empty_is_metadata() {
        assert!(looks_like_metadata(""));
        assert!(looks_like_metadata("   "));
    }

    #[test]
    fn test_linkedin_top_card_line() {
        assert!(looks_like_metadata("Toronto, ON · 2 weeks ago · Over 100 applicants"));
        assert!(looks_like_metadata("United States · Reposted 3 days ago · 57 applicants"));
    }

    #[test]
    fn test_applicant_count() {
        assert!(looks_like_metadata("Acme Corp · Over 200 applicants"));
    }

    #[test]
    fn test_employment_type_badges() {
        assert!(looks_like_metadata("Austin, Texas · Remote"));
        assert!(looks_like_metadata("$90K/yr - $120K/yr · Full-time"));
        assert!(looks_like_metadata("Acme · Actively reviewing applicants"));
    }

    #[test]
    fn test_location_prefix() {
        assert!(looks_like_metadata("Detroit, MI · Mid-Senior level"));
        assert!(looks_like_metadata("St. John's, NL ·"));
    }

    #[test]
    fn test_bare_relative_date() {
        assert!(looks_like_metadata("3 days ago"));
        assert!(looks_like_metadata("Posted 2 weeks ago and more text here"));
        assert!(looks_like_metadata("Posted today"));
    }

    #[test]
    fn test_description_is_not_metadata() {
        assert!(DESCRIPTION.len() >= 200);
        assert!(!looks_like_metadata(DESCRIPTION));
    }

    #[test]
    fn test_prose_mentioning_days_is_not_metadata() {
        let text = "Our team ships a release every 14 days and has grown steadily \
            since the company was founded in 2009.";
        assert!(!looks_like_metadata(text));
    }

    #[test]
    fn test_prose_with_a_bullet_is_not_metadata() {
        let text = "Globex builds flight software for small satellites and is growing its \
            ground systems group. Benefits · Remote work two days a week plus a stipend.";
        assert!(!looks_like_metadata(text));

        let text = "Our hiring process takes about three weeks from application to offer \
            · 5 applicants per opening make it to the final round.";
        assert!(!looks_like_metadata(text));
    }

    #[test]
    fn test_badge_line() {
        assert!(is_badge_line("Toronto, ON · Remote · Full-time"));
        assert!(!is_badge_line("Remote"));
        assert!(!is_badge_line(
            "We ship hardware to hospitals across the country every single week · Remote"
        ));
    }
}
