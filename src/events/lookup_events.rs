// src/events/lookup_events.rs
//
// Lookup trace events.
//
// One SourceAttempted per source the resolver touches, in chain order,
// then exactly one of BarcodeResolved / LookupExhausted. No business
// logic may depend on these; they exist for observability.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::lookup::{ProductSource, ResolvedProduct};
use crate::events::types::DomainEvent;

/// Emitted after each source attempt, success or failure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceAttempted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub barcode: String,
    pub source: ProductSource,
    /// "resolved", or the failure kind token ("not_found", "transport_error", ...)
    pub outcome: String,
}

impl SourceAttempted {
    pub fn new(barcode: String, source: ProductSource, outcome: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            barcode,
            source,
            outcome,
        }
    }
}

impl DomainEvent for SourceAttempted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "SourceAttempted" }
}

/// Emitted once when a lookup short-circuits on a successful source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeResolved {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub barcode: String,
    pub name: String,
    pub source: ProductSource,
}

impl BarcodeResolved {
    pub fn new(barcode: String, resolved: &ResolvedProduct) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            barcode,
            name: resolved.name.clone(),
            source: resolved.source,
        }
    }
}

impl DomainEvent for BarcodeResolved {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "BarcodeResolved" }
}

/// Emitted once when every source has been tried and failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupExhausted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub barcode: String,
    pub sources_tried: usize,
}

impl LookupExhausted {
    pub fn new(barcode: String, sources_tried: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            barcode,
            sources_tried,
        }
    }
}

impl DomainEvent for LookupExhausted {
    fn event_id(&self) -> Uuid { self.event_id }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn event_type(&self) -> &'static str { "LookupExhausted" }
}
