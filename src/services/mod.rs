// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod lookup_service;


// Re-export all services and their types
pub use catalog_service::{
    CatalogService,
    RegisterProductRequest,
    UpdateProductRequest,
};

pub use lookup_service::{
    CatalogLookup,
    ProductLookupService,
};
