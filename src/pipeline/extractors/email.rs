use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

/// Returns the first syntactically plausible email address in the raw text.
pub fn extract_email(raw_text: &str) -> Option<String> {
    EMAIL_PATTERN.find(raw_text).map(|m| m.as_str().to_string())
}
