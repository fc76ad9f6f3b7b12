use crate::extract::RecipeRecord;
use crate::output::{OutputError, OutputResult, RecordSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends one JSON object per record to a file (JSON Lines).
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the records file.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn write_record(&mut self, record: &RecipeRecord) -> OutputResult<()> {
        let line = serde_json::to_string(record)
            .map_err(|e| OutputError::Format(e.to_string()))?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
