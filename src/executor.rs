use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::ExecutionMode;
use crate::data_model::{ClassificationResult, ExtractionResult, RawDocument, ResumeRecord};
use crate::pipeline::classifier::ModelBundle;
use crate::pipeline::extractors::{extract_email, extract_phone, FieldExtractors};
use crate::pipeline::normalizer::normalize;
use crate::pipeline::readers::{DefaultDecoder, DocumentDecoder};
use crate::utils::prometheus_metrics::{
    DECODE_FAILURES_TOTAL, DOCUMENTS_PROCESSED_TOTAL, DOCUMENT_PROCESSING_DURATION_SECONDS,
};

/// Runs the extraction pipeline over documents and assembles one
/// `ResumeRecord` per document.
///
/// Everything it holds is read-only after construction, so one executor can
/// serve many documents at once.
pub struct PipelineExecutor {
    models: Arc<ModelBundle>,
    extractors: Arc<FieldExtractors>,
    decoder: Box<dyn DocumentDecoder>,
    mode: ExecutionMode,
}

impl PipelineExecutor {
    pub fn new(models: Arc<ModelBundle>, extractors: Arc<FieldExtractors>) -> Self {
        PipelineExecutor {
            models,
            extractors,
            decoder: Box::new(DefaultDecoder),
            mode: ExecutionMode::default(),
        }
    }

    pub fn with_decoder(mut self, decoder: Box<dyn DocumentDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Extraction and classification for already-decoded text.
    ///
    /// Name, email and phone read the raw text; skills, education and both
    /// classifiers read the normalized text. No extractor's miss stops the
    /// others.
    pub fn process_text(&self, raw_text: &str) -> (ExtractionResult, ClassificationResult) {
        let name = self.extractors.name.extract(raw_text);
        let email = extract_email(raw_text);
        let phone = extract_phone(raw_text);

        let normalized = normalize(raw_text);
        let classification = self.models.classify(&normalized);
        let skills = self.extractors.skills.extract(&normalized);
        let education = self.extractors.education.extract(&normalized);

        let extraction = ExtractionResult {
            name,
            email,
            phone,
            skills: Some(skills),
            education: Some(education),
        };
        (extraction, classification)
    }

    /// Decodes and processes one document. Never fails: a document whose
    /// bytes cannot be decoded is processed as empty text.
    #[instrument(skip(self, document), fields(filename = %document.filename))]
    pub fn process(&self, position: usize, document: &RawDocument) -> ResumeRecord {
        let timer = DOCUMENT_PROCESSING_DURATION_SECONDS.start_timer();

        let raw_text = match self.decoder.decode(document) {
            Ok(text) => text,
            Err(e) => {
                DECODE_FAILURES_TOTAL.inc();
                warn!(position, error = %e, "Could not decode document, continuing with empty text");
                String::new()
            }
        };
        let (extraction, classification) = self.process_text(&raw_text);

        DOCUMENTS_PROCESSED_TOTAL.inc();
        timer.observe_duration();
        debug!(
            position,
            category = %classification.category,
            skills = extraction.skills.as_ref().map_or(0, Vec::len),
            "Document processed"
        );

        ResumeRecord {
            position,
            filename: document.filename.clone(),
            extraction,
            classification,
        }
    }

    /// Processes a batch. Output order always matches input order, whichever
    /// execution mode is configured.
    pub fn run_batch(&self, documents: &[RawDocument]) -> Vec<ResumeRecord> {
        info!(documents = documents.len(), mode = ?self.mode, "Processing batch");
        match self.mode {
            ExecutionMode::Parallel => documents
                .par_iter()
                .enumerate()
                .map(|(position, document)| self.process(position, document))
                .collect(),
            ExecutionMode::Sequential => documents
                .iter()
                .enumerate()
                .map(|(position, document)| self.process(position, document))
                .collect(),
        }
    }
}
