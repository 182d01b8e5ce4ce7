// src/domain/mod.rs
//
// Domain root: declares the domain modules and re-exports their API.
// The rest of the crate imports from `crate::domain`.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod lookup;
pub mod product;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Product Domain
pub use product::{validate_product, Product};

// Lookup Domain
pub use lookup::{
    AggregateFailure, FailureKind, LookupError, LookupSource, ProductSource, ResolvedProduct,
    SourceFailure,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
