// src/pipeline/extractors/mod.rs

pub mod education;
pub mod email;
pub mod name;
pub mod phone;
pub mod skills;

use once_cell::sync::Lazy;
use std::collections::BTreeSet;

use crate::config::vocabulary::Vocabulary;
use crate::error::Result;

pub use education::EducationExtractor;
pub use email::extract_email;
pub use name::{NameExtractor, NAME_HEADER_WINDOW};
pub use phone::extract_phone;
pub use skills::SkillsExtractor;

/// The vocabulary-driven extractors, compiled once and shared read-only
/// between workers.
#[derive(Debug, Clone)]
pub struct FieldExtractors {
    pub name: NameExtractor,
    pub skills: SkillsExtractor,
    pub education: EducationExtractor,
}

impl FieldExtractors {
    pub fn from_vocabulary(vocabulary: &Vocabulary) -> Result<Self> {
        Ok(FieldExtractors {
            name: NameExtractor::new(vocabulary.name_blocklist.clone()),
            skills: SkillsExtractor::new(&vocabulary.skills)?,
            education: EducationExtractor::from_vocabulary(vocabulary)?,
        })
    }
}

static DEFAULT_EXTRACTORS: Lazy<FieldExtractors> = Lazy::new(|| {
    let vocabulary = Vocabulary::builtin().expect("bundled vocabulary is valid");
    FieldExtractors::from_vocabulary(&vocabulary).expect("bundled vocabulary compiles")
});

/// Name from the raw text, using the bundled block-list.
pub fn extract_name(raw_text: &str) -> Option<String> {
    DEFAULT_EXTRACTORS.name.extract(raw_text)
}

/// Skills from the normalized text, using the bundled catalogue.
pub fn extract_skills(normalized_text: &str) -> Vec<String> {
    DEFAULT_EXTRACTORS.skills.extract(normalized_text)
}

/// Education entries from the normalized text, using the bundled tables.
pub fn extract_education(normalized_text: &str) -> BTreeSet<String> {
    DEFAULT_EXTRACTORS.education.extract(normalized_text)
}
