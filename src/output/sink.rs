//! In-memory result accumulator with optional durable forwarding

use crate::model::{ProductRecord, RunResult, SearchTerm};
use crate::output::traits::SharedWriter;
use std::sync::Mutex;

/// Collects the records of one scrape run
///
/// `append` may be called concurrently from every store task; each batch is
/// added atomically and, when a writer is attached, forwarded to it before
/// `append` returns. The final content is the union of every appended batch,
/// duplicates included.
pub struct ResultSink {
    records: Mutex<Vec<ProductRecord>>,
    writer: Option<(SharedWriter, SearchTerm)>,
}

impl ResultSink {
    /// Creates a memory-only sink
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            writer: None,
        }
    }

    /// Creates a sink that also appends every batch to `writer`, tagged with
    /// the run's search term
    pub fn with_writer(writer: SharedWriter, term: SearchTerm) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            writer: Some((writer, term)),
        }
    }

    /// Appends a batch of records
    ///
    /// Durable write failures are logged and otherwise ignored; the batch is
    /// always kept in memory.
    pub fn append(&self, batch: Vec<ProductRecord>) {
        if batch.is_empty() {
            return;
        }

        if let Some((writer, term)) = &self.writer {
            match writer.lock() {
                Ok(mut writer) => {
                    if let Err(e) = writer.write_batch(term, &batch) {
                        tracing::warn!(
                            "Failed to persist {} records for '{}': {}",
                            batch.len(),
                            term,
                            e
                        );
                    }
                }
                Err(e) => tracing::warn!("Record writer unavailable: {}", e),
            }
        }

        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.extend(batch);
    }

    /// Number of records appended so far
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Takes everything appended so far
    ///
    /// Call only after every producer has finished.
    pub fn drain(&self) -> RunResult {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *records)
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::traits::share;
    use crate::output::traits::tests::MemoryWriter;
    use std::sync::Arc;

    fn record(store: &str, product: &str) -> ProductRecord {
        ProductRecord::new(store, "Supermarket", product)
    }

    #[test]
    fn test_append_and_drain() {
        let sink = ResultSink::new();
        sink.append(vec![record("Store A", "Milk 1L")]);
        sink.append(vec![record("Store B", "Milk 1L"), record("Store B", "Milk 2L")]);

        assert_eq!(sink.len(), 3);
        let drained = sink.drain();
        assert_eq!(drained.len(), 3);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_duplicate_batches_are_not_deduplicated() {
        let sink = ResultSink::new();
        let batch = vec![record("Store A", "Milk 1L"), record("Store A", "Milk 2L")];

        sink.append(batch.clone());
        sink.append(batch.clone());

        let drained = sink.drain();
        assert_eq!(drained.len(), 4);
        assert_eq!(
            drained
                .iter()
                .filter(|r| r.product_name == "Milk 1L")
                .count(),
            2
        );
    }

    #[test]
    fn test_empty_batch_is_not_forwarded() {
        let writer = MemoryWriter::default();
        let batches = writer.batches.clone();
        let sink = ResultSink::with_writer(share(writer), SearchTerm::new("milk").unwrap());

        sink.append(Vec::new());

        assert!(batches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_batches_forwarded_to_writer_as_they_arrive() {
        let writer = MemoryWriter::default();
        let batches = writer.batches.clone();
        let sink = ResultSink::with_writer(share(writer), SearchTerm::new("milk").unwrap());

        sink.append(vec![record("Store A", "Milk 1L")]);
        assert_eq!(batches.lock().unwrap().len(), 1);

        sink.append(vec![record("Store B", "Milk 1L")]);
        assert_eq!(batches.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_writer_failure_keeps_records_in_memory() {
        let writer = MemoryWriter {
            fail: true,
            ..Default::default()
        };
        let sink = ResultSink::with_writer(share(writer), SearchTerm::new("milk").unwrap());

        sink.append(vec![record("Store A", "Milk 1L")]);

        assert_eq!(sink.drain().len(), 1);
    }

    #[test]
    fn test_concurrent_appends() {
        let sink = Arc::new(ResultSink::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        sink.append(vec![record(&format!("Store {}", i), &format!("P{}", j))]);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(sink.drain().len(), 400);
    }
}
