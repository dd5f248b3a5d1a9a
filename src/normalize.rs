use once_cell::sync::Lazy;
use regex::Regex;

// Pre-compiled regex for whitespace normalization (compile once, use many times)
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex pattern")
});

/// Lead-in phrases job boards put in front of the description body
static BOILERPLATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:about\s+the\s+job|about\s+this\s+job|about\s+the\s+role|about\s+this\s+role|about\s+the\s+position|about\s+this\s+position)\b\s*:?\s*")
        .expect("Invalid boilerplate regex pattern")
});

/// Bare section header at the top of a description
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:job|role|position)\s+description\b\s*:?\s*")
        .expect("Invalid header regex pattern")
});

/// Clean raw element text into single-spaced prose.
///
/// Returns `None` when nothing but whitespace or lead-in boilerplate is left.
/// Leading phrases are stripped until none remain, so the function is
/// idempotent: `clean(&clean(x)?) == clean(x)`.
pub fn clean(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }

    let flattened = raw.replace(['\n', '\r', '\t'], " ");
    let mut result = normalize_whitespace(&flattened).trim().to_string();

    loop {
        let stripped = strip_leading(&BOILERPLATE_RE, &result);
        let stripped = strip_leading(&HEADER_RE, &stripped);
        if stripped == result {
            break;
        }
        result = stripped;
    }

    let result = normalize_whitespace(&result).trim().to_string();
    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

/// Normalize whitespace: collapse multiple spaces/newlines into single space
pub fn normalize_whitespace(content: &str) -> String {
    WHITESPACE_RE.replace_all(content, " ").to_string()
}

/// Collapse whitespace and trim, returning `None` for blank text
pub fn tidy(content: &str) -> Option<String> {
    let text = normalize_whitespace(content).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn strip_leading(re: &Regex, content: &str) -> String {
    re.replace(content, "").trim_start().to_string()
}
