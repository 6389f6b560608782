//! Record writer trait and output errors
//!
//! A `RecordWriter` is the durable side of a `ResultSink`: every batch the
//! sink accepts is handed to the writer immediately, append-only.

use crate::model::{ProductRecord, SearchTerm};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for durable, append-only record destinations
///
/// Implementations must never rewrite records from earlier batches.
pub trait RecordWriter: Send {
    /// Appends one batch of records found for `term`
    ///
    /// The batch should be on durable storage when this returns.
    fn write_batch(&mut self, term: &SearchTerm, records: &[ProductRecord]) -> OutputResult<()>;

    /// Flushes and closes out the writer at the end of an invocation
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

/// A writer shared between the sinks of consecutive runs
pub type SharedWriter = Arc<Mutex<dyn RecordWriter>>;

/// Wraps a writer for sharing between sinks
pub fn share<W: RecordWriter + 'static>(writer: W) -> SharedWriter {
    Arc::new(Mutex::new(writer))
}

/// Forwards every batch to several writers
///
/// All writers are attempted; the first error is reported after the rest have
/// had their turn.
#[derive(Default)]
pub struct FanoutWriter {
    writers: Vec<Box<dyn RecordWriter>>,
}

impl FanoutWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, writer: Box<dyn RecordWriter>) {
        self.writers.push(writer);
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }
}

impl RecordWriter for FanoutWriter {
    fn write_batch(&mut self, term: &SearchTerm, records: &[ProductRecord]) -> OutputResult<()> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.write_batch(term, records) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn finish(&mut self) -> OutputResult<()> {
        let mut first_error = None;
        for writer in &mut self.writers {
            if let Err(e) = writer.finish() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
