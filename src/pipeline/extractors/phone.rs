use once_cell::sync::Lazy;
use regex::Regex;

// North-American layout with an optional country code. A leading "+" or "("
// is not a word character, so those two openings are spelled out instead of
// relying on a leading `\b`.
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:
            \+\d{1,3} [-.\s]? \(? \d{3} \)?     # +CC, area code
          | \b\d{1,3} [-.\s]? \(? \d{3} \)?     # CC, area code
          | \( \d{3} \)?                        # (area code
          | \b\d{3} \)?                         # area code
        )
        [-.\s]? \d{3} [-.\s]? \d{4} \b
        ",
    )
    .expect("phone pattern is valid")
});

/// Returns the first phone-number-shaped substring of the raw text, exactly as
/// written.
pub fn extract_phone(raw_text: &str) -> Option<String> {
    PHONE_PATTERN.find(raw_text).map(|m| m.as_str().to_string())
}
