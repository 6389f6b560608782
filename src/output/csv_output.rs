//! Append-only CSV record writer

use crate::model::{ProductRecord, SearchTerm};
use crate::output::traits::{OutputResult, RecordWriter};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Appends records to a CSV file with the columns
/// `Storename,storeFormat,ProductName`
///
/// The header row is written only when the file starts out empty, so
/// consecutive invocations keep appending to the same table.
pub struct CsvRecordWriter {
    writer: csv::Writer<File>,
}

impl CsvRecordWriter {
    /// Opens `path` for appending, creating it if necessary
    pub fn open(path: &Path) -> OutputResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_empty {
            writer.write_record(["Storename", "storeFormat", "ProductName"])?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }
}

impl RecordWriter for CsvRecordWriter {
    fn write_batch(&mut self, _term: &SearchTerm, records: &[ProductRecord]) -> OutputResult<()> {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
