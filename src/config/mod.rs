// src/config/mod.rs
//
// Lookup pipeline configuration.
//
// No process-wide state: the composition root builds one of these and
// hands it to the services that need it.

use std::time::Duration;

/// Everything the remote lookup sources need to know.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Product page host scraped for names
    pub barcode_lookup_base_url: String,

    /// Open Food Facts API host
    pub open_food_facts_base_url: String,

    /// EAN-Search API host
    pub ean_search_base_url: String,

    /// EAN-Search API token. Without one the paid source answers 401,
    /// which the chain tolerates like any other source failure.
    pub ean_search_token: String,

    /// Applied to every outbound HTTP request
    pub request_timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            barcode_lookup_base_url: "https://www.barcodelookup.com".to_string(),
            open_food_facts_base_url: "https://world.openfoodfacts.org".to_string(),
            ean_search_base_url: "https://api.ean-search.org".to_string(),
            ean_search_token: String::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}
