use regex::Regex;

use crate::error::Result;
use crate::utils::whole_phrase_regex;

/// Catalogue-driven skill matcher.
///
/// Every catalogue phrase is compiled once, literally, into a case-insensitive
/// whole-phrase pattern. Matching is presence-only: the output lists each
/// matched phrase once, in catalogue order, regardless of where or how often
/// it appears in the text. Overlapping phrases ("Unity", "Unity3D") are
/// reported independently.
#[derive(Debug, Clone)]
pub struct SkillsExtractor {
    catalogue: Vec<(String, Regex)>,
}

impl SkillsExtractor {
    /// `skills` is expected to be de-duplicated already (see `Vocabulary`).
    pub fn new(skills: &[String]) -> Result<Self> {
        let catalogue = skills
            .iter()
            .map(|skill| -> Result<(String, Regex)> { Ok((skill.clone(), whole_phrase_regex(skill)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(SkillsExtractor { catalogue })
    }

    pub fn len(&self) -> usize {
        self.catalogue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogue.is_empty()
    }

    pub fn extract(&self, normalized_text: &str) -> Vec<String> {
        self.catalogue
            .iter()
            .filter(|(_, pattern)| pattern.is_match(normalized_text))
            .map(|(skill, _)| skill.clone())
            .collect()
    }
}
