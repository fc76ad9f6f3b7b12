//! Record output handling
//!
//! The engine streams extracted records into a [`RecordSink`]; the sink owns
//! serialization and persistence so the crawl core never blocks on format
//! concerns.

mod jsonl;

pub use jsonl::JsonLinesSink;

use crate::extract::RecipeRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format record: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for extracted recipe records.
///
/// Records arrive fully populated and are never mutated after emission.
pub trait RecordSink {
    /// Persists one record.
    fn write_record(&mut self, record: &RecipeRecord) -> OutputResult<()>;

    /// Flushes any buffered records.
    fn flush(&mut self) -> OutputResult<()>;
}

/// In-memory sink, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<RecipeRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RecipeRecord] {
        &self.records
    }
}

impl RecordSink for MemorySink {
    fn write_record(&mut self, record: &RecipeRecord) -> OutputResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
