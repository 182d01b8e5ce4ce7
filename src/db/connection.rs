// src/db/connection.rs
//
// SQLite connection pooling.
//
// One pool per process, opened by the composition root and shared as
// Arc<ConnectionPool>. Every connection runs the same init pragmas.

use std::path::{Path, PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::{AppError, AppResult};

pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// WAL keeps readers unblocked while a save is in flight; the busy
/// timeout absorbs short write contention.
const INIT_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA journal_mode = WAL;
     PRAGMA synchronous = NORMAL;
     PRAGMA busy_timeout = 5000;";

/// Default database location: {data_dir}/scanbasket/scanbasket.db
pub fn database_path() -> AppResult<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("no user data directory available".to_string()))?;

    let app_dir = data_dir.join("scanbasket");
    std::fs::create_dir_all(&app_dir)?;

    Ok(app_dir.join("scanbasket.db"))
}

/// Open the pool at the default location.
pub fn create_connection_pool() -> AppResult<ConnectionPool> {
    create_pool_at(&database_path()?)
}

/// Open a pool for an explicit database file. Tests point this at a
/// tempdir so pooled connections share one on-disk database.
pub fn create_pool_at(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager =
        SqliteConnectionManager::file(db_path).with_init(|conn| conn.execute_batch(INIT_PRAGMAS));

    // A handful of connections is plenty for a single-user tool
    let pool = Pool::builder().max_size(8).build(manager)?;

    Ok(pool)
}
