use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One uploaded resume as it arrives: a file name and its undecoded bytes.
///
/// A document has no identity beyond its position in the batch it was
/// submitted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub filename: String, // Only used to pick PDF vs plain-text decoding
    pub bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        RawDocument {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_pdf(&self) -> bool {
        let name = self.filename.as_bytes();
        name.len() >= 4 && name[name.len() - 4..].eq_ignore_ascii_case(b".pdf")
    }
}

/// Structured fields pulled out of one document.
///
/// `None` means the field was never searched. Once the orchestrator has run,
/// a searched-but-empty collection is `Some` of an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Option<Vec<String>>, // catalogue order, unique
    pub education: Option<BTreeSet<String>>,
}

impl ExtractionResult {
    /// Skills joined the way the persistence sinks store them.
    pub fn skills_joined(&self) -> String {
        self.skills
            .as_ref()
            .map(|skills| skills.join(", "))
            .unwrap_or_default()
    }

    pub fn education_joined(&self) -> String {
        self.education
            .as_ref()
            .map(|entries| entries.iter().map(String::as_str).collect::<Vec<_>>().join(", "))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: String,
    pub recommended_job: String,
}

/// The fully assembled output for one document, handed to the sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub position: usize,
    pub filename: String,
    #[serde(flatten)]
    pub extraction: ExtractionResult,
    #[serde(flatten)]
    pub classification: ClassificationResult,
}
