// src/pipeline/writers/jsonl_writer.rs

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::data_model::ResumeRecord;
use crate::error::Result;
use crate::pipeline::writers::RecordSink;

/// Appends each record as one line of JSON.
pub struct JsonLinesSink {
    writer: BufWriter<File>,
    label: String,
}

impl JsonLinesSink {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path.as_ref())?;
        Ok(JsonLinesSink {
            writer: BufWriter::new(file),
            label: format!("jsonl:{}", path.as_ref().display()),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn name(&self) -> &str {
        &self.label
    }

    fn write_record(&mut self, record: &ResumeRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
