// src/lib.rs
// Scanbasket - Local-first grocery catalog with multi-source barcode lookup
//
// Architecture:
// - Domain-centric: business rules live in domain modules
// - Event-driven: services coordinate through events
// - Explicit: no implicit behavior, all wiring happens in the composition root
// - Local-first: the user's catalog is always consulted before the network

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_product,
    AggregateFailure,
    FailureKind,
    LookupError,
    LookupSource,
    // Product
    Product,
    // Lookup
    ProductSource,
    ResolvedProduct,
    SourceFailure,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    BarcodeResolved,
    CatalogReset,
    DomainEvent,
    EventBus,
    EventLogEntry,
    LookupExhausted,
    ProductRegistered,
    ProductRemoved,
    ProductUpdated,
    SourceAttempted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_pool_at, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{ProductRepository, SqliteProductRepository};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    BarcodeLookupClient, EanSearchClient, HttpResponse, HttpTransport, OpenFoodFactsClient,
    ReqwestTransport, TransportError,
};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::LookupConfig;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Catalog
    CatalogService,
    RegisterProductRequest,
    UpdateProductRequest,
    // Lookup chain
    CatalogLookup,
    ProductLookupService,
};
