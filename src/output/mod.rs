//! Output module for scrape results
//!
//! This module handles:
//! - Accumulating records from concurrent store tasks (`ResultSink`)
//! - Durable append-only writers (CSV, SQLite)
//! - Run statistics

mod csv_output;
mod schema;
mod sink;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::CsvRecordWriter;
pub use sink::ResultSink;
pub use sqlite_output::SqliteRecordWriter;
pub use stats::{print_statistics, ScrapeStats};
pub use traits::{share, FanoutWriter, OutputError, OutputResult, RecordWriter, SharedWriter};

use crate::config::OutputConfig;
use crate::model::SearchTerm;
use std::path::Path;

/// Opens every writer enabled in the output configuration
///
/// # Returns
///
/// * `Ok(None)` - No durable output configured
/// * `Ok(Some(SharedWriter))` - A writer forwarding to each configured target
/// * `Err(OutputError)` - A target could not be opened
pub fn open_writers(
    config: &OutputConfig,
    config_hash: &str,
    terms: &[SearchTerm],
) -> OutputResult<Option<SharedWriter>> {
    let mut fanout = FanoutWriter::new();

    if let Some(path) = &config.csv_path {
        tracing::info!("Appending records to CSV file: {}", path);
        fanout.push(Box::new(CsvRecordWriter::open(Path::new(path))?));
    }

    if let Some(path) = &config.database_path {
        tracing::info!("Recording run in SQLite database: {}", path);
        fanout.push(Box::new(SqliteRecordWriter::open(
            Path::new(path),
            config_hash,
            terms,
        )?));
    }

    if fanout.is_empty() {
        Ok(None)
    } else {
        Ok(Some(share(fanout)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_writers_configured() {
        let writer = open_writers(&OutputConfig::default(), "hash", &[]).unwrap();
        assert!(writer.is_none());
    }

    #[test]
    fn test_open_both_writers() {
        let dir = tempfile::tempdir().unwrap();
        let config = OutputConfig {
            csv_path: Some(dir.path().join("out.csv").display().to_string()),
            database_path: Some(dir.path().join("out.db").display().to_string()),
        };

        let writer = open_writers(&config, "hash", &[SearchTerm::new("milk").unwrap()]).unwrap();
        assert!(writer.is_some());
        assert!(dir.path().join("out.csv").exists());
        assert!(dir.path().join("out.db").exists());
    }
}
