#![allow(non_snake_case)]

pub mod config;
pub mod data_model;
pub mod error;
pub mod executor;
pub mod pipeline;
pub mod utils;

pub use data_model::{ClassificationResult, ExtractionResult, RawDocument, ResumeRecord};
pub use error::{PipelineError, Result};
pub use executor::PipelineExecutor;
