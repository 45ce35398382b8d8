use crate::error::{PipelineError, Result};
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

const BUNDLED_VOCABULARY: &str = include_str!("../../config/vocabulary.yaml");

/// Domain word lists the extractors match against.
///
/// Kept as data so the matching code never hard-codes a skill or a degree
/// name. See `config/vocabulary.yaml` for the bundled tables.
#[derive(Deserialize, Debug, Clone)]
pub struct Vocabulary {
    /// Case-sensitive substrings that reject a candidate name.
    #[serde(default)]
    pub name_blocklist: Vec<String>,
    /// Skill catalogue. Output order follows this order.
    pub skills: Vec<String>,
    pub degree_families: Vec<DegreeFamily>,
    #[serde(default = "default_subject_connectors")]
    pub subject_connectors: Vec<String>,
    #[serde(default = "default_max_degree_chars")]
    pub max_degree_chars: usize,
    #[serde(default)]
    pub education_keywords: Vec<String>,
}

/// One family of degree keywords, e.g. every spelling of a bachelor's degree.
#[derive(Deserialize, Debug, Clone)]
pub struct DegreeFamily {
    pub family: String,
    /// Whole words matched case-insensitively ("Bachelor", "Secondary Education").
    #[serde(default)]
    pub words: Vec<String>,
    /// Dotted abbreviations matched case-sensitively with optional dots ("B.Tech").
    #[serde(default)]
    pub abbreviations: Vec<String>,
}

fn default_subject_connectors() -> Vec<String> {
    vec!["of".to_string(), "in".to_string()]
}

fn default_max_degree_chars() -> usize {
    59
}

impl Vocabulary {
    /// The tables compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_VOCABULARY, "<bundled>")
    }

    /// Parses, de-duplicates and validates a vocabulary document.
    ///
    /// Repeated entries keep their first position so catalogue order stays
    /// stable and every reported skill stays unique.
    pub fn from_yaml_str(content: &str, origin: &str) -> Result<Self> {
        let mut vocabulary: Vocabulary = serde_yaml::from_str(content).map_err(|e| {
            PipelineError::ConfigError(format!(
                "Failed to parse vocabulary YAML from '{}': {}",
                origin, e
            ))
        })?;

        let catalogue_len = vocabulary.skills.len();
        vocabulary.skills = vocabulary.skills.into_iter().unique().collect();
        if vocabulary.skills.len() != catalogue_len {
            debug!(
                dropped = catalogue_len - vocabulary.skills.len(),
                origin, "Dropped duplicate skill catalogue entries"
            );
        }
        vocabulary.education_keywords = vocabulary.education_keywords.into_iter().unique().collect();
        vocabulary.name_blocklist = vocabulary.name_blocklist.into_iter().unique().collect();

        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn validate(&self) -> Result<()> {
        if self.skills.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "Vocabulary: skills catalogue must not be empty".to_string(),
            ));
        }
        let has_blank = self
            .skills
            .iter()
            .chain(&self.education_keywords)
            .chain(&self.name_blocklist)
            .chain(&self.subject_connectors)
            .any(|s| s.trim().is_empty());
        if has_blank {
            return Err(PipelineError::ConfigValidationError(
                "Vocabulary: entries must not be blank".to_string(),
            ));
        }
        if self.degree_families.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "Vocabulary: at least one degree family is required".to_string(),
            ));
        }
        for family in &self.degree_families {
            if family.words.is_empty() && family.abbreviations.is_empty() {
                return Err(PipelineError::ConfigValidationError(format!(
                    "Vocabulary: degree family '{}' has neither words nor abbreviations",
                    family.family
                )));
            }
            let has_blank = family
                .words
                .iter()
                .chain(&family.abbreviations)
                .any(|s| s.trim_matches(|c: char| c == '.' || c.is_whitespace()).is_empty());
            if has_blank {
                return Err(PipelineError::ConfigValidationError(format!(
                    "Vocabulary: degree family '{}' contains a blank entry",
                    family.family
                )));
            }
        }
        if self.subject_connectors.is_empty() {
            return Err(PipelineError::ConfigValidationError(
                "Vocabulary: subject_connectors must not be empty".to_string(),
            ));
        }
        if self.max_degree_chars == 0 {
            return Err(PipelineError::ConfigValidationError(
                "Vocabulary: max_degree_chars must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Loads a vocabulary file from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_vocabulary<P: AsRef<Path>>(path: P) -> Result<Vocabulary> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref).map_err(|e| {
        PipelineError::ConfigError(format!(
            "Failed to read vocabulary file '{}': {}",
            path_ref.display(),
            e
        ))
    })?;
    Vocabulary::from_yaml_str(&content, &path_ref.display().to_string())
}
