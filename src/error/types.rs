// src/error/types.rs
//
// Infrastructure-level failures: database, pool, serialization, io.
// Lookup-source failures never travel through here; the chain carries
// those as values (see domain::lookup).

use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("domain rule violated: {0}")]
    Domain(#[from] DomainError),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
