// src/events/types.rs
//
// Catalog domain events: immutable facts about the product catalog.
// An event carries exactly what a subscriber needs to react, nothing
// more, and no behavior of its own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Implemented by everything the bus carries.
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Identity of this particular occurrence
    fn event_id(&self) -> Uuid;

    /// When the fact became true
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Stable name used in the emission log
    fn event_type(&self) -> &'static str;
}

/// A product was saved into the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRegistered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: Uuid,
    pub name: String,
    pub barcode: String,
}

impl ProductRegistered {
    pub fn new(product_id: Uuid, name: String, barcode: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
            name,
            barcode,
        }
    }
}

impl DomainEvent for ProductRegistered {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProductRegistered" }
}

/// A product's name or price changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: Uuid,
}

impl ProductUpdated {
    pub fn new(product_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
        }
    }
}

impl DomainEvent for ProductUpdated {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProductUpdated" }
}

/// A product was removed from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub product_id: Uuid,
}

impl ProductRemoved {
    pub fn new(product_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            product_id,
        }
    }
}

impl DomainEvent for ProductRemoved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "ProductRemoved" }
}

/// The whole catalog was wiped (the data-reset operation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogReset {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub products_removed: usize,
}

impl CatalogReset {
    pub fn new(products_removed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            products_removed,
        }
    }
}

impl DomainEvent for CatalogReset {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "CatalogReset" }
}
