use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// The Error type for pipeline operations.
///
/// A field extractor finding nothing is not an error and never shows up here;
/// extractors return `None` or an empty collection instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration validation error: {0}")]
    ConfigValidationError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to load model artifact '{path}': {reason}")]
    ModelLoadError { path: String, reason: String },

    #[error("Failed to decode document '{filename}': {reason}")]
    DecodeError { filename: String, reason: String },

    #[error("Sink '{sink}' failed: {reason}")]
    PersistenceError { sink: String, reason: String },

    #[error("Database error: {source}")]
    DatabaseError {
        #[from]
        source: rusqlite::Error,
    },

    #[error("CSV error: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },

    #[error("Serialization/Deserialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Invalid pattern: {source}")]
    PatternError {
        #[from]
        source: regex::Error,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}
