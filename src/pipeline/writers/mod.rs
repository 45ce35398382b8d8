// src/pipeline/writers/mod.rs

pub mod base_writer;
pub mod csv_writer;
pub mod jsonl_writer;
pub mod sqlite_writer;

pub use base_writer::RecordSink;
pub use csv_writer::{CsvSink, SPREADSHEET_HEADER};
pub use jsonl_writer::JsonLinesSink;
pub use sqlite_writer::{SqliteSink, StoredResume};

use tracing::{error, warn};

use crate::data_model::ResumeRecord;
use crate::error::PipelineError;
use crate::utils::prometheus_metrics::{PERSISTENCE_FAILURES_TOTAL, RECORDS_PERSISTED_TOTAL};

/// Outcome of handing records to the sinks. Counts are per (record, sink) write.
#[derive(Debug, Default)]
pub struct PersistReport {
    pub written: usize,
    pub failed: usize,
    /// One `PersistenceError` per failed write or flush, in the order they happened.
    pub errors: Vec<PipelineError>,
}

impl PersistReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    fn record_failure(&mut self, error: PipelineError) {
        self.failed += 1;
        self.errors.push(error);
    }
}

fn persistence_error(sink: &dyn RecordSink, source: PipelineError) -> PipelineError {
    PipelineError::PersistenceError {
        sink: sink.name().to_string(),
        reason: source.to_string(),
    }
}

/// Writes one record to every sink. A failing sink is logged and counted;
/// the remaining sinks still get the record.
pub fn persist_record(record: &ResumeRecord, sinks: &mut [Box<dyn RecordSink>], report: &mut PersistReport) {
    for sink in sinks.iter_mut() {
        match sink.write_record(record) {
            Ok(()) => {
                report.written += 1;
                RECORDS_PERSISTED_TOTAL.inc();
            }
            Err(e) => {
                let e = persistence_error(&**sink, e);
                PERSISTENCE_FAILURES_TOTAL.inc();
                error!(
                    position = record.position,
                    filename = %record.filename,
                    error = %e,
                    "Failed to persist record"
                );
                report.record_failure(e);
            }
        }
    }
}

/// Flushes every sink, logging the ones that fail.
pub fn flush_sinks(sinks: &mut [Box<dyn RecordSink>], report: &mut PersistReport) {
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.flush() {
            let e = persistence_error(&**sink, e);
            PERSISTENCE_FAILURES_TOTAL.inc();
            warn!(error = %e, "Failed to flush sink");
            report.record_failure(e);
        }
    }
}

/// Writes every record to every sink, then flushes.
pub fn persist_records(records: &[ResumeRecord], sinks: &mut [Box<dyn RecordSink>]) -> PersistReport {
    let mut report = PersistReport::default();
    for record in records {
        persist_record(record, sinks, &mut report);
    }
    flush_sinks(sinks, &mut report);
    report
}
