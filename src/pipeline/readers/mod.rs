// src/pipeline/readers/mod.rs

pub mod base_reader;
pub mod decoder;
pub mod file_reader;

pub use base_reader::BaseReader;
pub use decoder::{DefaultDecoder, DocumentDecoder};
pub use file_reader::FileReader;
