// src/domain/lookup/value_objects.rs
//
// Lookup Value Objects
//
// Pure, immutable data structures representing barcode lookup outcomes.
// A failed source is data the chain carries forward, never control flow.
//
// These types have no behavior beyond construction and Display: no
// mutation, no I/O. Everything is Clone + Serialize so an outcome can be
// logged or carried across a boundary wholesale.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// RESOLVED PRODUCT (SUCCESSFUL LOOKUP)
// ============================================================================

/// A barcode successfully resolved to a display name, tagged with the
/// source that produced it. Owned by the caller after return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProduct {
    /// Display name (non-empty, trimmed, HTML-entity-decoded)
    pub name: String,

    /// Which source produced this name
    pub source: ProductSource,
}

impl ResolvedProduct {
    pub fn new(name: String, source: ProductSource) -> Self {
        Self { name, source }
    }
}

// ============================================================================
// PRODUCT SOURCE (PROVENANCE)
// ============================================================================

/// The four ordered lookup origins.
/// Callers use this to decide whether a result is worth persisting into
/// the local catalog (a local hit already lives there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    /// The user's own catalog, no network involved
    LocalCatalog,

    /// barcodelookup.com product page (HTML scrape)
    BarcodeLookup,

    /// Open Food Facts public database (free JSON API)
    OpenFoodFacts,

    /// EAN-Search commercial database (paid JSON API, last resort)
    EanSearch,
}

impl ProductSource {
    /// True for sources reached over the network
    pub fn is_remote(&self) -> bool {
        !matches!(self, ProductSource::LocalCatalog)
    }
}

impl std::fmt::Display for ProductSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductSource::LocalCatalog => write!(f, "local_catalog"),
            ProductSource::BarcodeLookup => write!(f, "barcode_lookup"),
            ProductSource::OpenFoodFacts => write!(f, "open_food_facts"),
            ProductSource::EanSearch => write!(f, "ean_search"),
        }
    }
}

// ============================================================================
// SOURCE FAILURE
// ============================================================================

/// Why a single source could not produce a name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Source has no record, or extraction yielded nothing usable
    NotFound,

    /// Unexpected HTTP status or malformed envelope
    InvalidResponse,

    /// Credential rejected (paid API only)
    Unauthorized,

    /// Body could not be decoded as the expected text/JSON
    ParseError,

    /// Network or timeout failure
    TransportError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NotFound => write!(f, "not_found"),
            FailureKind::InvalidResponse => write!(f, "invalid_response"),
            FailureKind::Unauthorized => write!(f, "unauthorized"),
            FailureKind::ParseError => write!(f, "parse_error"),
            FailureKind::TransportError => write!(f, "transport_error"),
        }
    }
}

/// One source's failed attempt. Accumulated by the resolver; never
/// surfaced to the caller on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFailure {
    /// The source that failed
    pub source: ProductSource,

    /// Classification of the failure
    pub kind: FailureKind,

    /// Human-readable detail for diagnostics
    pub detail: String,
}

impl SourceFailure {
    pub fn new(source: ProductSource, kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            source,
            kind,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.source, self.kind, self.detail)
    }
}

// ============================================================================
// AGGREGATE FAILURE (TOTAL EXHAUSTION)
// ============================================================================

/// Terminal failure once every source has been tried.
/// Carries the per-source failures in the order they were attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateFailure {
    pub failures: Vec<SourceFailure>,
}

impl AggregateFailure {
    pub fn new(failures: Vec<SourceFailure>) -> Self {
        Self { failures }
    }
}

impl std::fmt::Display for AggregateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let summary: Vec<String> = self
            .failures
            .iter()
            .map(|failure| format!("{}/{}", failure.source, failure.kind))
            .collect();
        write!(f, "{}", summary.join(", "))
    }
}

// ============================================================================
// LOOKUP ERROR (CALLER-FACING)
// ============================================================================

/// The only errors the resolver ever returns to its caller
#[derive(Debug, Error)]
pub enum LookupError {
    /// The input barcode was empty; no source was attempted
    #[error("barcode is empty")]
    EmptyBarcode,

    /// Every source was attempted and failed
    #[error("all lookup sources failed: {0}")]
    AllSourcesFailed(AggregateFailure),
}

// ============================================================================
// TESTS
// ============================================================================
