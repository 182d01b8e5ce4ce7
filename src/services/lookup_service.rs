// src/services/lookup_service.rs
//
// Barcode Lookup Service
//
// Resolves one scanned barcode to a display name by walking a fixed chain
// of sources and stopping at the first usable answer.
//
// CRITICAL RULES:
// - Source order is a program invariant: local catalog, then the free
//   scrape, then the free API, then the paid API (quota preserved)
// - A failed source is recorded and the chain continues; nothing a source
//   does can abort the walk
// - The chain never writes to the catalog; persisting a remote hit is the
//   caller's decision
// - One trace event per attempted source, in order

use std::sync::Arc;

use crate::config::LookupConfig;
use crate::domain::lookup::{
    AggregateFailure, FailureKind, LookupError, LookupSource, ProductSource, ResolvedProduct,
    SourceFailure,
};
use crate::events::{BarcodeResolved, EventBus, LookupExhausted, SourceAttempted};
use crate::integrations::{
    BarcodeLookupClient, EanSearchClient, HttpTransport, OpenFoodFactsClient,
};
use crate::repositories::ProductRepository;

use async_trait::async_trait;

// ============================================================================
// LOCAL CATALOG SOURCE
// ============================================================================

/// First link in the chain: the user's own catalog. Synchronous, free,
/// and the only source that cannot fail for transport reasons.
pub struct CatalogLookup {
    products: Arc<dyn ProductRepository>,
}

impl CatalogLookup {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl LookupSource for CatalogLookup {
    fn source(&self) -> ProductSource {
        ProductSource::LocalCatalog
    }

    async fn lookup(&self, barcode: &str) -> Result<ResolvedProduct, SourceFailure> {
        match self.products.find_by_barcode(barcode) {
            Ok(Some(product)) => Ok(ResolvedProduct::new(
                product.name,
                ProductSource::LocalCatalog,
            )),
            Ok(None) => Err(SourceFailure::new(
                ProductSource::LocalCatalog,
                FailureKind::NotFound,
                "barcode not in catalog",
            )),
            // A broken catalog must not stop the remote sources from running
            Err(e) => Err(SourceFailure::new(
                ProductSource::LocalCatalog,
                FailureKind::NotFound,
                format!("catalog read failed: {}", e),
            )),
        }
    }
}

// ============================================================================
// LOOKUP SERVICE
// ============================================================================

pub struct ProductLookupService {
    sources: Vec<Arc<dyn LookupSource>>,
    event_bus: Arc<EventBus>,
}

impl ProductLookupService {
    /// Build the service with its fixed source chain. The order is not a
    /// parameter on purpose.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        transport: Arc<dyn HttpTransport>,
        config: LookupConfig,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let sources: Vec<Arc<dyn LookupSource>> = vec![
            Arc::new(CatalogLookup::new(products)),
            Arc::new(BarcodeLookupClient::new(
                transport.clone(),
                config.barcode_lookup_base_url,
            )),
            Arc::new(OpenFoodFactsClient::new(
                transport.clone(),
                config.open_food_facts_base_url,
            )),
            Arc::new(EanSearchClient::new(
                transport,
                config.ean_search_base_url,
                config.ean_search_token,
            )),
        ];

        Self::from_sources(sources, event_bus)
    }

    pub(crate) fn from_sources(
        sources: Vec<Arc<dyn LookupSource>>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self { sources, event_bus }
    }

    /// Resolve one barcode. Returns the first usable name with its
    /// provenance, or the ordered failures of every source.
    ///
    /// Cancellation model: dropping this future (e.g. a caller-level
    /// timeout) aborts the whole chain; a per-request timeout inside a
    /// source is an ordinary transport failure and the walk continues.
    pub async fn resolve(&self, barcode: &str) -> Result<ResolvedProduct, LookupError> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(LookupError::EmptyBarcode);
        }

        let mut failures: Vec<SourceFailure> = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let tag = source.source();

            match source.lookup(barcode).await {
                Ok(resolved) => {
                    let name = resolved.name.trim();

                    // A source must never report success with an empty name
                    if name.is_empty() {
                        let failure = SourceFailure::new(
                            tag,
                            FailureKind::InvalidResponse,
                            "source reported success with an empty name",
                        );
                        self.record_failure(barcode, failure, &mut failures);
                        continue;
                    }

                    let resolved = ResolvedProduct::new(name.to_string(), resolved.source);

                    self.event_bus.emit(SourceAttempted::new(
                        barcode.to_string(),
                        tag,
                        "resolved".to_string(),
                    ));
                    self.event_bus
                        .emit(BarcodeResolved::new(barcode.to_string(), &resolved));

                    log::info!("barcode {} resolved via {}", barcode, tag);
                    return Ok(resolved);
                }
                Err(failure) => {
                    self.record_failure(barcode, failure, &mut failures);
                }
            }
        }

        self.event_bus
            .emit(LookupExhausted::new(barcode.to_string(), failures.len()));
        log::warn!(
            "barcode {} not found in any of {} sources",
            barcode,
            failures.len()
        );

        Err(LookupError::AllSourcesFailed(AggregateFailure::new(
            failures,
        )))
    }

    fn record_failure(
        &self,
        barcode: &str,
        failure: SourceFailure,
        failures: &mut Vec<SourceFailure>,
    ) {
        log::debug!(
            "source {} failed for barcode {}: {} ({})",
            failure.source,
            barcode,
            failure.kind,
            failure.detail
        );
        self.event_bus.emit(SourceAttempted::new(
            barcode.to_string(),
            failure.source,
            failure.kind.to_string(),
        ));
        failures.push(failure);
    }
}
