//! Freshness inference - turn "posted 3 days ago" style phrases into a day count

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Time unit recognised in a relative-date phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Week,
    Day,
    Month,
    Hour,
    Minute,
}

impl Unit {
    fn pattern(self) -> &'static str {
        match self {
            Unit::Week => r"(?:weeks?|wks?)",
            Unit::Day => r"days?",
            Unit::Month => r"(?:months?|mos?)",
            Unit::Hour => r"(?:hours?|hrs?)",
            Unit::Minute => r"(?:minutes?|mins?)",
        }
    }

    fn to_days(self, n: u32) -> u32 {
        match self {
            Unit::Week => n.saturating_mul(7),
            Unit::Day => n,
            Unit::Month => n.saturating_mul(30),
            Unit::Hour => n.div_ceil(24),
            Unit::Minute => 1,
        }
    }
}

const UNITS: [Unit; 5] = [Unit::Week, Unit::Day, Unit::Month, Unit::Hour, Unit::Minute];

/// Connector templates; `{n}` is the numeral capture and `{u}` the unit.
const CONNECTORS: &[&str] = &[
    r"\bposted\s+{n}\s*{u}\s+ago\b",
    r"\bactive\s+{n}\s*{u}\s+ago\b",
    r"\b{n}\s*{u}\s+ago\b",
    r"\b{n}\s*{u}\s+back\b",
    r"\bsince\s+{n}\s*{u}\b",
    r"\bover\s+{n}\s*{u}\b",
    r"\bmore\s+than\s+{n}\s*{u}\b",
    r"\bless\s+than\s+{n}\s*{u}\b",
    r"\babout\s+{n}\s*{u}\b",
    r"\bnearly\s+{n}\s*{u}\b",
    r"\balmost\s+{n}\s*{u}\b",
];

/// Ordered pattern table, first match wins
static PATTERNS: Lazy<Vec<(Regex, Unit)>> = Lazy::new(|| {
    let mut patterns = Vec::with_capacity(UNITS.len() * CONNECTORS.len());
    for unit in UNITS {
        for connector in CONNECTORS {
            let source = connector
                .replace("{n}", r"(\d+)\+?")
                .replace("{u}", unit.pattern());
            let re = Regex::new(&format!("(?i){}", source))
                .expect("Invalid freshness regex pattern");
            patterns.push((re, unit));
        }
    }
    patterns
});

static TODAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:today|just\s+posted|new\s+posting|recently\s+posted)\b")
        .expect("Invalid today regex pattern")
});

static YESTERDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\byesterday\b").expect("Invalid yesterday regex pattern")
});

/// Infer how many days ago a job was posted from free-form text.
///
/// `None` means no date phrase was found, which is distinct from `Some(0)`
/// ("posted today").
pub fn infer_freshness_days(text: &str) -> Option<u32> {
    if text.trim().is_empty() {
        return None;
    }

    for (re, unit) in PATTERNS.iter() {
        if let Some(caps) = re.captures(text) {
            // Numerals too large for u32 are not a real posting age
            if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                return Some(unit.to_days(n));
            }
        }
    }

    if TODAY_RE.is_match(text) {
        return Some(0);
    }
    if YESTERDAY_RE.is_match(text) {
        return Some(1);
    }

    None
}

/// Whole days between an ISO-8601 date (or datetime) and `now`.
///
/// Used for `datePosted` in structured data. Dates in the future clamp to 0.
pub fn days_since(date_posted: &str, now: DateTime<Utc>) -> Option<u32> {
    let date_posted = date_posted.trim();
    let posted = DateTime::parse_from_rfc3339(date_posted)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date_posted, "%Y-%m-%d"))
        .or_else(|_| {
            date_posted
                .get(..10)
                .ok_or(())
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| ()))
        })
        .ok()?;

    let days = (now.date_naive() - posted).num_days();
    Some(u32::try_from(days.max(0)).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_days_ago() {
        for n in [1u32, 2, 7, 15, 30, 365] {
            let text = format!("Posted {} days ago", n);
            assert_eq!(infer_freshness_days(&text), Some(n), "{}", text);
        }
        assert_eq!(infer_freshness_days("1 day ago"), Some(1));
    }

    #[test]
    fn test_weeks_months_hours() {
        assert_eq!(infer_freshness_days("3 weeks ago"), Some(21));
        assert_eq!(infer_freshness_days("1 week ago"), Some(7));
        assert_eq!(infer_freshness_days("2 months ago"), Some(60));
        assert_eq!(infer_freshness_days("5 hours ago"), Some(1));
        assert_eq!(infer_freshness_days("25 hours ago"), Some(2));
        assert_eq!(infer_freshness_days("48 hours ago"), Some(2));
        assert_eq!(infer_freshness_days("12 minutes ago"), Some(1));
    }

    #[test]
    fn test_zero_hours_is_today() {
        assert_eq!(infer_freshness_days("0 hours ago"), Some(0));
    }

    #[test]
    fn test_connectors() {
        assert_eq!(infer_freshness_days("Reposted 2 weeks back"), Some(14));
        assert_eq!(infer_freshness_days("Active 5 days ago"), Some(5));
        assert_eq!(infer_freshness_days("over 3 months"), Some(90));
        assert_eq!(infer_freshness_days("More than 30 days"), Some(30));
        assert_eq!(infer_freshness_days("less than 1 hour"), Some(1));
        assert_eq!(infer_freshness_days("about 2 weeks"), Some(14));
        assert_eq!(infer_freshness_days("nearly 4 days"), Some(4));
        assert_eq!(infer_freshness_days("Open since 10 days"), Some(10));
    }

    #[test]
    fn test_plus_suffix_and_abbreviations() {
        assert_eq!(infer_freshness_days("Posted 30+ days ago"), Some(30));
        assert_eq!(infer_freshness_days("3 wks ago"), Some(21));
        assert_eq!(infer_freshness_days("6 hrs ago"), Some(1));
        assert_eq!(infer_freshness_days("2 mos ago"), Some(60));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_freshness_days("POSTED 4 DAYS AGO"), Some(4));
        assert_eq!(infer_freshness_days("Just Posted"), Some(0));
    }

    #[test]
    fn test_embedded_in_metadata_line() {
        let text = "Toronto, ON · 2 weeks ago · Over 100 applicants";
        assert_eq!(infer_freshness_days(text), Some(14));
    }

    #[test]
    fn test_today_phrases() {
        assert_eq!(infer_freshness_days("today"), Some(0));
        assert_eq!(infer_freshness_days("just posted"), Some(0));
        assert_eq!(infer_freshness_days("new posting"), Some(0));
        assert_eq!(infer_freshness_days("recently posted"), Some(0));
        assert_eq!(infer_freshness_days("Posted Today"), Some(0));
    }

    #[test]
    fn test_yesterday() {
        assert_eq!(infer_freshness_days("yesterday"), Some(1));
        assert_eq!(infer_freshness_days("Posted yesterday"), Some(1));
    }

    #[test]
    fn test_numeral_beats_today_phrase() {
        assert_eq!(infer_freshness_days("Apply today! Posted 3 days ago"), Some(3));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(infer_freshness_days(""), None);
        assert_eq!(infer_freshness_days("   "), None);
        assert_eq!(infer_freshness_days("Senior Mechanical Engineer"), None);
        assert_eq!(infer_freshness_days("Over 100 applicants"), None);
        assert_eq!(infer_freshness_days("3 days of paid leave"), None);
    }

    #[test]
    fn test_days_since() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        assert_eq!(days_since("2024-03-10", now), Some(5));
        assert_eq!(days_since("2024-03-15T08:00:00Z", now), Some(0));
        assert_eq!(days_since("2024-03-01T08:00:00.000-05:00", now), Some(14));
        assert_eq!(days_since("2024-04-01", now), Some(0));
        assert_eq!(days_since("not a date", now), None);
    }
}
