// src/utils/prometheus_metrics.rs

use once_cell::sync::Lazy;
use prometheus::{gather, register_counter, register_histogram, Counter, Encoder, Histogram, TextEncoder};

use crate::error::{PipelineError, Result};

pub static DOCUMENTS_PROCESSED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sift_documents_processed_total",
        "Total number of documents run through the extraction pipeline."
    )
    .expect("Failed to register DOCUMENTS_PROCESSED_TOTAL counter")
});

pub static DECODE_FAILURES_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sift_decode_failures_total",
        "Total number of documents whose bytes could not be decoded and fell back to empty text."
    )
    .expect("Failed to register DECODE_FAILURES_TOTAL counter")
});

pub static RECORDS_PERSISTED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sift_records_persisted_total",
        "Total number of successful record writes across all sinks."
    )
    .expect("Failed to register RECORDS_PERSISTED_TOTAL counter")
});

pub static PERSISTENCE_FAILURES_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "sift_persistence_failures_total",
        "Total number of failed record writes across all sinks."
    )
    .expect("Failed to register PERSISTENCE_FAILURES_TOTAL counter")
});

pub static DOCUMENT_PROCESSING_DURATION_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "sift_document_processing_duration_seconds",
        "Histogram of per-document processing durations (decode to assembled record)."
    )
    .expect("Failed to register DOCUMENT_PROCESSING_DURATION_SECONDS histogram")
});

/// Renders everything in the default registry in the Prometheus text format.
pub fn render_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = vec![];
    encoder
        .encode(&gather(), &mut buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Could not encode prometheus metrics: {}", e)))?;
    String::from_utf8(buffer)
        .map_err(|e| PipelineError::Unexpected(format!("Prometheus metrics UTF-8 error: {}", e)))
}
