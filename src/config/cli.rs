use std::path::PathBuf;

use clap::Parser;

// Define command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Extract structured candidate data from resumes", long_about = None)]
pub struct Args {
    /// Resume files or directories of resumes (PDF or plain text).
    #[arg(required_unless_present = "validate_config")]
    pub inputs: Vec<PathBuf>,

    /// Path to the pipeline configuration YAML file.
    #[arg(short = 'c', long, default_value = "config/pipeline_config.yaml")]
    pub pipeline_config: PathBuf,

    /// Override the model directory from the configuration.
    #[arg(short = 'm', long)]
    pub model_dir: Option<PathBuf>,

    /// Override the SQLite database path.
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Override the spreadsheet (CSV) path.
    #[arg(long)]
    pub spreadsheet: Option<PathBuf>,

    /// Write every record as one JSON line to this file.
    #[arg(short = 'o', long)]
    pub json_output: Option<PathBuf>,

    /// Process documents one after another instead of on the thread pool.
    #[arg(long)]
    pub sequential: bool,

    /// Validate the pipeline configuration, vocabulary and models, then exit.
    #[arg(long)]
    pub validate_config: bool,

    /// Emit logs as JSON.
    #[arg(long)]
    pub log_json: bool,

    /// Print Prometheus metrics to stderr after the batch.
    #[arg(long)]
    pub print_metrics: bool,
}
