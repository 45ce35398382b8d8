// src/config.rs

pub mod cli;
pub mod pipeline;
pub mod vocabulary;

pub use pipeline::{load_pipeline_config, ExecutionMode, PersistenceConfig, PipelineConfig};
pub use vocabulary::{load_vocabulary, DegreeFamily, Vocabulary};
