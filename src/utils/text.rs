// Text utils

use regex::Regex;

/// Returns the prefix of `text` holding at most `max_chars` characters.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Compiles a case-insensitive pattern for `phrase` taken literally, matching
/// only where it is not glued to a word character on either side.
///
/// Unlike a bare `\b...\b`, this still works for phrases that begin or end
/// with punctuation, such as "C++" or "Amazon Web Services (AWS)".
pub fn whole_phrase_regex(phrase: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)(?:^|\W){}(?:$|\W)", regex::escape(phrase)))
}
