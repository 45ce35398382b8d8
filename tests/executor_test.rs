use std::sync::Arc;
use ResumeSift::config::{ExecutionMode, Vocabulary};
use ResumeSift::data_model::{RawDocument, ResumeRecord};
use ResumeSift::error::Result;
use ResumeSift::executor::PipelineExecutor;
use ResumeSift::pipeline::classifier::{ModelBundle, TextClassifier};
use ResumeSift::pipeline::extractors::FieldExtractors;
use ResumeSift::pipeline::readers::{DefaultDecoder, DocumentDecoder};

const STUB_PDF_HEADER: &[u8] = b"%PDF-stub\n";

// Keyword classifier standing in for a trained model.
struct KeywordClassifier {
    keyword: &'static str,
    hit: &'static str,
    miss: &'static str,
}

impl TextClassifier for KeywordClassifier {
    fn classify(&self, normalized_text: &str) -> String {
        if normalized_text.to_lowercase().contains(self.keyword) {
            self.hit.to_string()
        } else {
            self.miss.to_string()
        }
    }
}

// Treats everything after a fixed header as the text layer of a PDF; other
// files go through the default lossy decoding.
struct StubPdfDecoder;

impl DocumentDecoder for StubPdfDecoder {
    fn decode(&self, document: &RawDocument) -> Result<String> {
        match document.bytes.strip_prefix(STUB_PDF_HEADER) {
            Some(text) if document.is_pdf() => Ok(String::from_utf8_lossy(text).into_owned()),
            _ => DefaultDecoder.decode(document),
        }
    }
}

fn create_executor() -> PipelineExecutor {
    let models = ModelBundle::new(
        Box::new(KeywordClassifier {
            keyword: "python",
            hit: "Data Science",
            miss: "HR",
        }),
        Box::new(KeywordClassifier {
            keyword: "sql",
            hit: "Data Analyst",
            miss: "Recruiter",
        }),
    );
    let extractors = FieldExtractors::from_vocabulary(&Vocabulary::builtin().unwrap()).unwrap();
    PipelineExecutor::new(Arc::new(models), Arc::new(extractors))
}

fn pdf_document(name: &str, text: &str) -> RawDocument {
    let mut bytes = STUB_PDF_HEADER.to_vec();
    bytes.extend_from_slice(text.as_bytes());
    RawDocument::new(name, bytes)
}

// Single-page PDF with one Helvetica text line per entry.
fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::from("BT\n/F1 12 Tf\n72 720 Td\n");
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push_str("0 -16 Td\n");
        }
        let escaped = line.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)");
        content.push_str(&format!("({}) Tj\n", escaped));
    }
    content.push_str("ET\n");

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!("<< /Length {} >>\nstream\n{}endstream", content.len(), content),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }
    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    pdf.into_bytes()
}

fn sample_batch() -> Vec<RawDocument> {
    vec![
        pdf_document(
            "john_smith.pdf",
            "John Smith\nSoftware Engineer\njohn.smith@example.com | +1 (415) 555-2671\n\
             Skills: Java, Docker, Kubernetes\nMaster of Business Administration 2019",
        ),
        RawDocument::new(
            "jane_doe.txt",
            b"Jane Doe\xff\xfe\njane@example.org\nPython and SQL, some Tableau\nB.S. in Physics\n".to_vec(),
        ),
    ]
}

#[test]
fn test_two_document_batch_in_input_order() {
    let executor = create_executor().with_decoder(Box::new(StubPdfDecoder));
    let records = executor.run_batch(&sample_batch());

    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.position, 0);
    assert_eq!(first.filename, "john_smith.pdf");
    assert_eq!(first.extraction.name.as_deref(), Some("John Smith"));
    assert_eq!(first.extraction.email.as_deref(), Some("john.smith@example.com"));
    assert_eq!(first.extraction.phone.as_deref(), Some("+1 (415) 555-2671"));
    assert_eq!(
        first.extraction.skills,
        Some(vec!["Java".to_string(), "Docker".to_string(), "Kubernetes".to_string()])
    );
    assert_eq!(first.extraction.education_joined(), "Master of Business Administration");
    assert_eq!(first.classification.category, "HR");
    assert_eq!(first.classification.recommended_job, "Recruiter");

    // Invalid UTF-8 is replaced, not fatal.
    let second = &records[1];
    assert_eq!(second.position, 1);
    assert_eq!(second.filename, "jane_doe.txt");
    assert_eq!(second.extraction.name.as_deref(), Some("Jane Doe"));
    assert_eq!(second.extraction.email.as_deref(), Some("jane@example.org"));
    assert_eq!(second.extraction.phone, None);
    assert_eq!(
        second.extraction.skills,
        Some(vec!["Python".to_string(), "SQL".to_string(), "Tableau".to_string()])
    );
    assert_eq!(second.extraction.education_joined(), "B.S. in Physics");
    assert_eq!(second.classification.category, "Data Science");
    assert_eq!(second.classification.recommended_job, "Data Analyst");
}

#[test]
fn test_reprocessing_is_byte_identical() {
    let executor = create_executor().with_decoder(Box::new(StubPdfDecoder));
    let batch = sample_batch();

    let serialize = |records: Vec<ResumeRecord>| -> Vec<String> {
        records.iter().map(|r| serde_json::to_string(r).unwrap()).collect()
    };
    let first_run = serialize(executor.run_batch(&batch));
    let second_run = serialize(executor.run_batch(&batch));
    assert_eq!(first_run, second_run);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let batch: Vec<RawDocument> = (0..32)
        .map(|i| {
            let text = if i % 2 == 0 {
                format!("Candidate Number{}\nPython, Git\nBachelor of Arts", i)
            } else {
                format!("resume {}\nSQL and Excel\nNursing", i)
            };
            RawDocument::new(format!("doc_{:02}.txt", i), text.into_bytes())
        })
        .collect();

    let parallel = create_executor().with_mode(ExecutionMode::Parallel).run_batch(&batch);
    let sequential = create_executor().with_mode(ExecutionMode::Sequential).run_batch(&batch);

    assert_eq!(parallel, sequential);
    let positions: Vec<usize> = parallel.iter().map(|r| r.position).collect();
    assert_eq!(positions, (0..32).collect::<Vec<_>>());
}

#[test]
fn test_undecodable_pdf_does_not_stop_batch() {
    let executor = create_executor();
    let batch = vec![
        RawDocument::new("broken.pdf", b"definitely not a pdf".to_vec()),
        RawDocument::new("ok.txt", b"Jane Doe\nPython".to_vec()),
    ];
    let records = executor.run_batch(&batch);

    assert_eq!(records.len(), 2);
    let broken = &records[0].extraction;
    assert_eq!(broken.name, None);
    assert_eq!(broken.email, None);
    assert_eq!(broken.skills, Some(vec![]));
    assert_eq!(broken.education, Some(Default::default()));
    assert_eq!(records[0].classification.category, "HR");

    assert_eq!(records[1].extraction.name.as_deref(), Some("Jane Doe"));
    assert_eq!(records[1].extraction.skills, Some(vec!["Python".to_string()]));
}

#[test]
fn test_real_pdf_next_to_malformed_text() {
    let pdf = build_pdf(&["John Smith", "john@example.com", "Python, SQL"]);

    let text = DefaultDecoder
        .decode(&RawDocument::new("john_smith.pdf", pdf.clone()))
        .unwrap();
    assert!(text.contains("John Smith"), "unexpected PDF text {:?}", text);

    let executor = create_executor();
    let batch = vec![
        RawDocument::new("john_smith.pdf", pdf),
        RawDocument::new("jane_doe.txt", b"Jane Doe \xff\njane@example.org".to_vec()),
    ];
    let records = executor.run_batch(&batch);

    assert_eq!(records.len(), 2);
    let first = &records[0];
    assert_eq!(first.filename, "john_smith.pdf");
    assert_eq!(first.extraction.name.as_deref(), Some("John Smith"));
    assert_eq!(first.extraction.email.as_deref(), Some("john@example.com"));
    assert_eq!(
        first.extraction.skills,
        Some(vec!["Python".to_string(), "SQL".to_string()])
    );
    assert_eq!(first.classification.category, "Data Science");
    assert_eq!(first.classification.recommended_job, "Data Analyst");

    assert_eq!(records[1].filename, "jane_doe.txt");
    assert_eq!(records[1].extraction.name.as_deref(), Some("Jane Doe"));
}

#[test]
fn test_empty_batch() {
    assert!(create_executor().run_batch(&[]).is_empty());
}
