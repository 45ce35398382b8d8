use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;
use ResumeSift::data_model::{ClassificationResult, ExtractionResult, ResumeRecord};
use ResumeSift::error::PipelineError;
use ResumeSift::pipeline::writers::{persist_records, CsvSink, JsonLinesSink, RecordSink, SqliteSink};

fn create_test_record(position: usize, name: &str) -> ResumeRecord {
    ResumeRecord {
        position,
        filename: format!("resume_{}.txt", position),
        extraction: ExtractionResult {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
            phone: None,
            skills: Some(vec!["Python".to_string(), "SQL".to_string()]),
            education: Some(BTreeSet::from(["Bachelor of Arts".to_string()])),
        },
        classification: ClassificationResult {
            category: "Data Science".to_string(),
            recommended_job: "Data Analyst".to_string(),
        },
    }
}

#[test]
fn test_records_reach_every_sink() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("resume.db");
    let csv_path = dir.path().join("resume_data.csv");
    let jsonl_path = dir.path().join("records.jsonl");

    let records = vec![create_test_record(0, "Jane Doe"), create_test_record(1, "John Smith")];
    let mut sinks: Vec<Box<dyn RecordSink>> = vec![
        Box::new(SqliteSink::open(&db_path).unwrap()),
        Box::new(CsvSink::new(&csv_path)),
        Box::new(JsonLinesSink::open(&jsonl_path).unwrap()),
    ];

    let report = persist_records(&records, &mut sinks);
    assert_eq!(report.written, 6);
    assert!(report.is_clean());
    assert!(report.errors.is_empty());
    drop(sinks);

    let db = SqliteSink::open(&db_path).unwrap();
    assert_eq!(db.count().unwrap(), 2);
    let rows = db.fetch_all().unwrap();
    assert_eq!(rows[1].name.as_deref(), Some("John Smith"));
    assert_eq!(rows[1].email.as_deref(), Some("john.smith@example.com"));
    assert_eq!(rows[1].phone, None);
    assert_eq!(rows[1].skills, "Python, SQL");

    let csv_content = fs::read_to_string(&csv_path).unwrap();
    let mut reader = csv::Reader::from_reader(csv_content.as_bytes());
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(
        headers,
        vec!["Name", "Email", "Phone", "Category", "Job Recommendation", "Skills", "Education"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "Jane Doe");
    assert_eq!(&rows[0][5], "Python, SQL");
    assert_eq!(&rows[0][6], "Bachelor of Arts");

    let jsonl = fs::read_to_string(&jsonl_path).unwrap();
    let positions: Vec<usize> = jsonl
        .lines()
        .map(|line| serde_json::from_str::<ResumeRecord>(line).unwrap().position)
        .collect();
    assert_eq!(positions, vec![0, 1]);
}

#[test]
fn test_spreadsheet_appends_across_runs() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("resume_data.csv");

    for run in 0..3 {
        let mut sinks: Vec<Box<dyn RecordSink>> = vec![Box::new(CsvSink::new(&csv_path))];
        persist_records(&[create_test_record(run, "Jane Doe")], &mut sinks);
    }

    let content = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 4);
    assert_eq!(content.matches("Job Recommendation").count(), 1);
}

#[test]
fn test_failing_sink_does_not_block_others() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("resume.db");
    // A directory cannot be opened for appending, so every spreadsheet write fails.
    let locked_csv = dir.path().join("locked.csv");
    fs::create_dir(&locked_csv).unwrap();

    let records = vec![create_test_record(0, "Jane Doe"), create_test_record(1, "John Smith")];
    let mut sinks: Vec<Box<dyn RecordSink>> = vec![
        Box::new(CsvSink::new(&locked_csv)),
        Box::new(SqliteSink::open(&db_path).unwrap()),
    ];

    let report = persist_records(&records, &mut sinks);
    assert_eq!(report.failed, 2);
    assert_eq!(report.written, 2);
    assert_eq!(report.errors.len(), 2);
    for e in &report.errors {
        match e {
            PipelineError::PersistenceError { sink, .. } => assert!(sink.starts_with("spreadsheet:"), "unexpected sink {}", sink),
            other => panic!("Expected PersistenceError, got {:?}", other),
        }
    }
    drop(sinks);

    assert_eq!(SqliteSink::open(&db_path).unwrap().count().unwrap(), 2);
    // The records themselves are untouched by the failure.
    assert_eq!(records[1].extraction.name.as_deref(), Some("John Smith"));
}
