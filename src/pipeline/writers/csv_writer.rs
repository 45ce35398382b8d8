// src/pipeline/writers/csv_writer.rs

use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::data_model::ResumeRecord;
use crate::error::Result;
use crate::pipeline::writers::RecordSink;

pub const SPREADSHEET_HEADER: [&str; 7] = [
    "Name",
    "Email",
    "Phone",
    "Category",
    "Job Recommendation",
    "Skills",
    "Education",
];

/// Appends one row per record to a spreadsheet-style CSV file.
///
/// The file is reopened for every record, so a file that is locked or
/// unwritable only fails the rows written while it is. The header row is
/// written whenever the file is new or empty.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
    label: String,
}

impl CsvSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = format!("spreadsheet:{}", path.display());
        CsvSink { path, label }
    }
}

impl RecordSink for CsvSink {
    fn name(&self) -> &str {
        &self.label
    }

    fn write_record(&mut self, record: &ResumeRecord) -> Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if needs_header {
            writer.write_record(SPREADSHEET_HEADER)?;
        }
        let extraction = &record.extraction;
        writer.write_record([
            extraction.name.as_deref().unwrap_or_default(),
            extraction.email.as_deref().unwrap_or_default(),
            extraction.phone.as_deref().unwrap_or_default(),
            record.classification.category.as_str(),
            record.classification.recommended_job.as_str(),
            extraction.skills_joined().as_str(),
            extraction.education_joined().as_str(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::{ClassificationResult, ExtractionResult};
    use std::fs;
    use tempfile::tempdir;

    fn record(name: Option<&str>) -> ResumeRecord {
        ResumeRecord {
            position: 0,
            filename: "cv.txt".to_string(),
            extraction: ExtractionResult {
                name: name.map(str::to_string),
                skills: Some(vec!["Python".to_string(), "Git".to_string()]),
                education: Some(Default::default()),
                ..Default::default()
            },
            classification: ClassificationResult {
                category: "Engineering".to_string(),
                recommended_job: "Backend Developer".to_string(),
            },
        }
    }

    #[test]
    fn test_header_written_once_and_rows_appended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume_data.csv");

        let mut sink = CsvSink::new(&path);
        sink.write_record(&record(Some("Jane Doe"))).unwrap();
        // A second sink on the same file must not repeat the header.
        let mut again = CsvSink::new(&path);
        again.write_record(&record(None)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Name,Email,Phone,Category,Job Recommendation,Skills,Education",
                "Jane Doe,,,Engineering,Backend Developer,\"Python, Git\",",
                ",,,Engineering,Backend Developer,\"Python, Git\",",
            ]
        );
    }

    #[test]
    fn test_unwritable_path_is_error() {
        let dir = tempdir().unwrap();
        let mut sink = CsvSink::new(dir.path());
        assert!(sink.write_record(&record(Some("Jane Doe"))).is_err());
    }
}
