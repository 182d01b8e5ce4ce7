// src/db/mod.rs
//
// SQLite infrastructure: pooled connections and schema versioning.

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_pool_at, database_path, ConnectionPool, PooledConn,
};
pub use migrations::initialize_database;
