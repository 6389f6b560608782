//! Database schema definitions for the SQLite output

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track scrape invocations
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    search_terms TEXT NOT NULL,
    status TEXT NOT NULL
);

-- One row per matched product per store
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    search_term TEXT NOT NULL,
    store_name TEXT NOT NULL,
    store_format TEXT NOT NULL,
    product_name TEXT NOT NULL,
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_products_run ON products(run_id);
CREATE INDEX IF NOT EXISTS idx_products_term ON products(search_term);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
