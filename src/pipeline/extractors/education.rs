use itertools::Itertools;
use regex::Regex;
use std::collections::BTreeSet;

use crate::config::vocabulary::{DegreeFamily, Vocabulary};
use crate::error::Result;
use crate::utils::whole_phrase_regex;

/// Two-pass education matcher.
///
/// Pass A finds degree phrases ("Master of Business Administration", "B.Tech")
/// with an optional "of"/"in" subject. Pass B adds stand-alone fields of
/// study, skipping any keyword that already sits inside a kept Pass A phrase.
///
/// The final union de-duplicates on the exact string only: "Bachelor of Arts"
/// and "BACHELOR OF ARTS" are both kept.
#[derive(Debug, Clone)]
pub struct EducationExtractor {
    degree_patterns: Vec<(String, Regex)>,
    keywords: Vec<(String, Regex)>,
    max_degree_chars: usize,
}

impl EducationExtractor {
    pub fn new(
        families: &[DegreeFamily],
        subject_connectors: &[String],
        keywords: &[String],
        max_degree_chars: usize,
    ) -> Result<Self> {
        let degree_patterns = families
            .iter()
            .map(|family| -> Result<(String, Regex)> {
                let pattern = degree_pattern(family, subject_connectors);
                Ok((family.family.clone(), Regex::new(&pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;
        let keywords = keywords
            .iter()
            .map(|keyword| -> Result<(String, Regex)> { Ok((keyword.clone(), whole_phrase_regex(keyword)?)) })
            .collect::<Result<Vec<_>>>()?;

        Ok(EducationExtractor {
            degree_patterns,
            keywords,
            max_degree_chars,
        })
    }

    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        Self::new(
            &vocabulary.degree_families,
            &vocabulary.subject_connectors,
            &vocabulary.education_keywords,
            vocabulary.max_degree_chars,
        )
    }

    pub fn extract(&self, normalized_text: &str) -> BTreeSet<String> {
        // Pass A: every non-overlapping match of each family, runaway captures dropped.
        let degrees: Vec<String> = self
            .degree_patterns
            .iter()
            .flat_map(|(_, pattern)| pattern.find_iter(normalized_text))
            .map(|m| m.as_str().trim().to_string())
            .filter(|degree| degree.chars().count() <= self.max_degree_chars)
            .collect();

        // Pass B
        let degrees_lower: Vec<String> = degrees.iter().map(|d| d.to_lowercase()).collect();
        let fields = self
            .keywords
            .iter()
            .filter(|(_, pattern)| pattern.is_match(normalized_text))
            .filter(|(keyword, _)| {
                let keyword = keyword.to_lowercase();
                !degrees_lower.iter().any(|degree| degree.contains(&keyword))
            })
            .map(|(keyword, _)| keyword.clone());

        degrees.into_iter().chain(fields).collect()
    }
}

/// `\b(?:<keywords>)(?:\s+(?:of|in)\s+<subject>)?`
fn degree_pattern(family: &DegreeFamily, subject_connectors: &[String]) -> String {
    let words = family
        .words
        .iter()
        .map(|word| format!(r"(?i:{})\b", word.split_whitespace().map(regex::escape).join(r"\s+")));
    let abbreviations = family.abbreviations.iter().map(|abbr| abbreviation_pattern(abbr));
    let connectors = subject_connectors.iter().map(|c| regex::escape(c.trim())).join("|");

    format!(
        r"\b(?:{})(?:\s+(?i:{})\s+[A-Za-z\s&]+)?",
        words.chain(abbreviations).join("|"),
        connectors
    )
}

// "B.Tech" -> B\.?Tech\b ; "Ph.D." -> Ph\.?D\b\.?
fn abbreviation_pattern(abbreviation: &str) -> String {
    let abbreviation = abbreviation.trim();
    let core = abbreviation
        .split('.')
        .filter(|part| !part.is_empty())
        .map(regex::escape)
        .join(r"\.?");
    if abbreviation.ends_with('.') {
        format!(r"{}\b\.?", core)
    } else {
        format!(r"{}\b", core)
    }
}
