// src/integrations/mod.rs
//
// External integrations - everything that talks to the outside world.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Clients never create or modify catalog entities
// - All external API concerns (headers, envelopes, status codes) live here

pub mod barcode_lookup;
pub mod ean_search;
pub mod open_food_facts;
pub mod transport;

pub use barcode_lookup::{BarcodeLookupClient, ExtractionRules};
pub use ean_search::EanSearchClient;
pub use open_food_facts::OpenFoodFactsClient;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, TransportError};
