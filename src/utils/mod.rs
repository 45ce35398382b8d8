// Utils

pub mod prometheus_metrics;
pub mod text;

pub use text::{take_chars, whole_phrase_regex};
