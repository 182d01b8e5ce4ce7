// src/db/migrations.rs
//
// Schema versioning.
//
// The version lives in a one-row table. initialize_database brings a
// fresh file to the current version and refuses to touch a file it does
// not recognize; there are no automatic upgrades.

use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Bump when the schema changes shape.
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Idempotent: brings a fresh database to the current version and
/// leaves an up-to-date one alone.
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    match schema_version(conn)? {
        0 => {
            create_catalog_schema(conn)?;
            record_version(conn, CURRENT_SCHEMA_VERSION)
        }
        v if v == CURRENT_SCHEMA_VERSION => Ok(()),
        v if v < CURRENT_SCHEMA_VERSION => Err(AppError::Other(format!(
            "database schema v{} needs a manual migration to v{}",
            v, CURRENT_SCHEMA_VERSION
        ))),
        v => Err(AppError::Other(format!(
            "database schema v{} was written by a newer build (this one speaks v{})",
            v, CURRENT_SCHEMA_VERSION
        ))),
    }
}

/// 0 means a fresh file with no version table yet.
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_version_table: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !has_version_table {
        return Ok(0);
    }

    let version = conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get(0)
    })?;

    Ok(version)
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);
         DELETE FROM schema_version;",
    )?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;

    Ok(())
}

/// v1: the product catalog.
///
/// Barcode is indexed but NOT unique: the catalog tolerates duplicate
/// entries and lookups take the oldest one.
fn create_catalog_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            barcode TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_products_barcode ON products(barcode);",
    )?;

    Ok(())
}
