//! Canonical text used by the classifiers and the vocabulary extractors.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// URLs, @mentions and #hashtags run to the next whitespace. The retweet and
// carbon-copy markers only count as standalone tokens; ASCII word boundaries
// keep the decision the same before and after non-ASCII characters are
// blanked out.
static SOCIAL_NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"http\S+|(?-u:\b)RT(?-u:\b)|(?-u:\b)cc(?-u:\b)|@\S+|#\S+")
        .expect("social noise pattern is valid")
});

static NON_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\x00-\x7F]").expect("non-ascii pattern is valid"));

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strips social-media artifacts and non-ASCII characters, then collapses
/// whitespace.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    // Removing one token can expose a marker next to it ("RThttp://x"), so
    // substitute until nothing is left. Each pass shrinks the non-space count.
    let mut current = text.to_string();
    loop {
        let stripped = match SOCIAL_NOISE.replace_all(&current, " ") {
            Cow::Borrowed(_) => None,
            Cow::Owned(stripped) => Some(stripped),
        };
        match stripped {
            Some(stripped) => current = stripped,
            None => break,
        }
    }

    let ascii = NON_ASCII.replace_all(&current, " ");
    WHITESPACE_RUN.replace_all(&ascii, " ").trim().to_string()
}
