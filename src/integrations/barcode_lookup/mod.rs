// src/integrations/barcode_lookup/mod.rs

pub mod client;

pub use client::{BarcodeLookupClient, ExtractionRules};
