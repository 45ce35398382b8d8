use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils::take_chars;

/// Names are only looked for in the document header.
pub const NAME_HEADER_WINDOW: usize = 150;

// Two consecutive capitalised tokens: "Jane", or an all-caps "JANE".
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:[A-Z][a-z]+|[A-Z]{2,})\s+(?:[A-Z][a-z]+|[A-Z]{2,})\b")
        .expect("name pattern is valid")
});

/// Picks the candidate name out of the raw (original casing) document header.
///
/// Only the first two-token match inside the header window is considered. If
/// that match contains a block-listed header word the result is `None`; there
/// is no second attempt further down the document.
#[derive(Debug, Clone)]
pub struct NameExtractor {
    blocklist: Vec<String>,
}

impl NameExtractor {
    pub fn new(blocklist: Vec<String>) -> Self {
        NameExtractor { blocklist }
    }

    pub fn extract(&self, raw_text: &str) -> Option<String> {
        let header = take_chars(raw_text, NAME_HEADER_WINDOW);
        let candidate = NAME_PATTERN.find(header)?.as_str();
        if self.blocklist.iter().any(|word| candidate.contains(word.as_str())) {
            return None;
        }
        Some(candidate.to_string())
    }
}
