// src/pipeline/mod.rs

pub mod classifier;
pub mod extractors;
pub mod normalizer;
pub mod readers;
pub mod writers;

pub use normalizer::normalize;
