use crate::data_model::ResumeRecord;
use crate::error::Result;

/// A persistence collaborator that receives finished records one at a time.
///
/// A failed write must leave the record untouched and the sink usable for the
/// next record.
pub trait RecordSink: Send {
    /// Short label used in logs and error messages.
    fn name(&self) -> &str;

    fn write_record(&mut self, record: &ResumeRecord) -> Result<()>;

    /// Pushes buffered output to its destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
