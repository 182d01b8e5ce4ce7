// src/events/mod.rs
//
// Event system surface. The type-erased handler plumbing stays inside
// the bus module; only the bus itself and the event types are public.

pub mod bus;
pub mod lookup_events;
pub mod types;

pub use types::DomainEvent;

pub use types::{CatalogReset, ProductRegistered, ProductRemoved, ProductUpdated};

pub use lookup_events::{BarcodeResolved, LookupExhausted, SourceAttempted};

pub use bus::{EventBus, EventLogEntry};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
