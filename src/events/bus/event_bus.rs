// src/events/bus/event_bus.rs
//
// Synchronous in-process event bus.
//
// Handlers run immediately on the emitting thread, in subscription order.
// Every emission is appended to an in-memory log so tests and debugging
// sessions can ask what actually happened, in which order.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::events::types::DomainEvent;

/// Handlers are stored type-erased; `subscribe` owns the downcast.
type Handler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// One recorded emission, oldest first in the log.
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub handlers_run: usize,
}

/// Dispatches domain events to subscribed handlers.
///
/// Services emit facts; interested parties subscribe. Neither side knows
/// about the other. Shared across services as `Arc<EventBus>`.
pub struct EventBus {
    handlers: RwLock<HashMap<TypeId, Vec<Handler>>>,
    emissions: RwLock<Vec<EventLogEntry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            emissions: RwLock::new(Vec::new()),
        }
    }

    /// Register a handler for one event type. Handlers of the same type
    /// run in the order they were subscribed.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: Handler = Box::new(move |payload| match payload.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => log::error!(
                "handler for {} received a foreign payload",
                std::any::type_name::<E>()
            ),
        });

        self.handlers
            .write()
            .unwrap()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Record and dispatch one event, synchronously.
    ///
    /// A panicking handler is caught and logged; the handlers after it
    /// still run.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let subscribed = handlers.get(&TypeId::of::<E>());

        let entry = EventLogEntry {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            handlers_run: subscribed.map_or(0, Vec::len),
        };
        log::debug!(
            "event {} ({}) -> {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handlers_run
        );
        self.emissions.write().unwrap().push(entry);

        for (position, handler) in subscribed.into_iter().flatten().enumerate() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler(&event as &dyn Any)
            }));
            if outcome.is_err() {
                log::error!(
                    "handler {} for {} panicked; continuing with the rest",
                    position,
                    event.event_type()
                );
            }
        }
    }

    /// Everything emitted on this bus so far.
    pub fn emission_log(&self) -> Vec<EventLogEntry> {
        self.emissions.read().unwrap().clone()
    }

    /// How many handlers are registered for an event type.
    pub fn subscriber_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .unwrap()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
