//! SQLite-based record writer
//!
//! Each invocation opens a row in `runs`; every appended batch lands in
//! `products` inside its own transaction so a crash keeps all earlier batches.

use crate::model::{ProductRecord, SearchTerm};
use crate::output::schema::initialize_schema;
use crate::output::traits::{OutputResult, RecordWriter};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite record writer
pub struct SqliteRecordWriter {
    conn: Connection,
    run_id: i64,
}

impl SqliteRecordWriter {
    /// Opens (or creates) the database and starts a new run
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `config_hash` - Hash of the configuration used for this run
    /// * `terms` - Search terms this invocation will process
    pub fn open(path: &Path, config_hash: &str, terms: &[SearchTerm]) -> OutputResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        Self::start(conn, config_hash, terms)
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory(config_hash: &str, terms: &[SearchTerm]) -> OutputResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Self::start(conn, config_hash, terms)
    }

    fn start(conn: Connection, config_hash: &str, terms: &[SearchTerm]) -> OutputResult<Self> {
        initialize_schema(&conn)?;

        let joined = terms
            .iter()
            .map(SearchTerm::as_str)
            .collect::<Vec<_>>()
            .join(",");

        conn.execute(
            "INSERT INTO runs (started_at, config_hash, search_terms, status) VALUES (?1, ?2, ?3, ?4)",
            params![Utc::now().to_rfc3339(), config_hash, joined, "running"],
        )?;
        let run_id = conn.last_insert_rowid();

        tracing::debug!("Started SQLite output run {}", run_id);

        Ok(Self { conn, run_id })
    }

    /// ID of the run this writer appends to
    pub fn run_id(&self) -> i64 {
        self.run_id
    }

    /// Loads the records stored for a run, in insertion order
    pub fn load_products(&self, run_id: i64) -> OutputResult<Vec<ProductRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT store_name, store_format, product_name FROM products
             WHERE run_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![run_id], |row| {
            Ok(ProductRecord {
                store_name: row.get(0)?,
                store_format: row.get(1)?,
                product_name: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Returns the status column of a run
    pub fn run_status(&self, run_id: i64) -> OutputResult<String> {
        Ok(self.conn.query_row(
            "SELECT status FROM runs WHERE id = ?1",
            params![run_id],
            |row| row.get(0),
        )?)
    }
}

impl RecordWriter for SqliteRecordWriter {
    fn write_batch(&mut self, term: &SearchTerm, records: &[ProductRecord]) -> OutputResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO products (run_id, search_term, store_name, store_format, product_name, recorded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for record in records {
                stmt.execute(params![
                    self.run_id,
                    term.as_str(),
                    record.store_name,
                    record.store_format,
                    record.product_name,
                    now
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.conn.execute(
            "UPDATE runs SET status = ?1, finished_at = ?2 WHERE id = ?3",
            params!["completed", Utc::now().to_rfc3339(), self.run_id],
        )?;
        tracing::debug!("Completed SQLite output run {}", self.run_id);
        Ok(())
    }
}
