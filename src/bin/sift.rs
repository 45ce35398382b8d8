// src/bin/sift.rs

use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use ResumeSift::config::cli::Args;
use ResumeSift::config::{load_pipeline_config, load_vocabulary, ExecutionMode, PersistenceConfig, PipelineConfig, Vocabulary};
use ResumeSift::data_model::RawDocument;
use ResumeSift::error::Result;
use ResumeSift::executor::PipelineExecutor;
use ResumeSift::pipeline::classifier::ModelBundle;
use ResumeSift::pipeline::extractors::FieldExtractors;
use ResumeSift::pipeline::readers::{BaseReader, FileReader};
use ResumeSift::pipeline::writers::{
    flush_sinks, persist_record, CsvSink, JsonLinesSink, PersistReport, RecordSink, SqliteSink,
};
use ResumeSift::utils::prometheus_metrics::render_metrics;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")); // Default to info if RUST_LOG is not set
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Command-line flags win over the YAML file.
fn apply_overrides(config: &mut PipelineConfig, args: &Args) {
    if let Some(dir) = &args.model_dir {
        config.model_dir = dir.clone();
    }
    if let Some(path) = &args.database {
        config.persistence.database = Some(path.clone());
    }
    if let Some(path) = &args.spreadsheet {
        config.persistence.spreadsheet = Some(path.clone());
    }
    if let Some(path) = &args.json_output {
        config.persistence.json_output = Some(path.clone());
    }
    if args.sequential {
        config.execution = ExecutionMode::Sequential;
    }
}

fn create_progress_bar(total_items: u64, message: &str, template: &str) -> ProgressBar {
    let pb = ProgressBar::new(total_items);
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_bar()) // Fallback style
            .progress_chars("=> "),
    );
    pb
}

/// Opens every configured sink. A sink that cannot be opened is reported and
/// left out; the batch is still processed and printed.
fn build_sinks(persistence: &PersistenceConfig) -> Vec<Box<dyn RecordSink>> {
    let mut sinks: Vec<Box<dyn RecordSink>> = Vec::new();
    if let Some(path) = &persistence.database {
        match SqliteSink::open(path) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => error!(path = %path.display(), error = %e, "Could not open database, skipping it"),
        }
    }
    if let Some(path) = &persistence.spreadsheet {
        sinks.push(Box::new(CsvSink::new(path)));
    }
    if let Some(path) = &persistence.json_output {
        match JsonLinesSink::open(path) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => error!(path = %path.display(), error = %e, "Could not open JSON output, skipping it"),
        }
    }
    sinks
}

fn read_inputs(args: &Args) -> Result<Vec<RawDocument>> {
    let reader = FileReader::new(args.inputs.clone());
    let documents = reader
        .read_documents()?
        .filter_map(|result| match result {
            Ok(doc) => Some(doc),
            Err(e) => {
                error!(error = %e, "Error reading document, skipping it");
                None
            }
        })
        .collect();
    Ok(documents)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json);

    let mut config = load_pipeline_config(&args.pipeline_config)?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let vocabulary = match &config.vocabulary {
        Some(path) => load_vocabulary(path)?,
        None => Vocabulary::builtin()?,
    };
    let extractors = FieldExtractors::from_vocabulary(&vocabulary)?;
    info!(skills = extractors.skills.len(), "Vocabulary loaded");

    // Refuse to start without both classifiers.
    let models = ModelBundle::load(&config.model_dir).map_err(|e| {
        error!(error = %e, "Model loading failed");
        e
    })?;

    if args.validate_config {
        info!("Configuration, vocabulary and models are valid.");
        return Ok(());
    }

    let documents = read_inputs(&args)?;
    if documents.is_empty() {
        warn!("No documents to process.");
        return Ok(());
    }

    let executor = PipelineExecutor::new(Arc::new(models), Arc::new(extractors)).with_mode(config.execution);
    let start = Instant::now();
    let records = executor.run_batch(&documents);
    info!(records = records.len(), elapsed = %HumanDuration(start.elapsed()), "Batch processed");

    let mut sinks = build_sinks(&config.persistence);
    let mut report = PersistReport::default();
    if !sinks.is_empty() {
        let template = "{spinner:.green} [{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})";
        let pb = create_progress_bar(records.len() as u64, "Persisting records", template);
        for record in &records {
            persist_record(record, &mut sinks, &mut report);
            pb.inc(1);
        }
        flush_sinks(&mut sinks, &mut report);
        pb.finish_with_message("Records persisted");
    }

    for record in &records {
        println!("{}", serde_json::to_string(record)?);
    }

    info!("--------------------");
    info!("Processing Summary:");
    info!("  Documents processed: {}", records.len());
    info!("  Sink writes succeeded: {}", report.written);
    if report.is_clean() {
        info!("  Sink writes failed: 0");
    } else {
        warn!("  Sink writes failed: {}", report.failed);
    }
    info!("  Total time: {}", HumanDuration(start.elapsed()));
    info!("--------------------");

    if args.print_metrics {
        eprintln!("{}", render_metrics()?);
    }
    Ok(())
}
