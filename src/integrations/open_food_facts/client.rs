// src/integrations/open_food_facts/client.rs
//
// Open Food Facts lookup (free JSON API).
//
// The v2 product endpoint answers with a status flag and an optional
// product record; the display name is composed from brand, localized
// name and quantity. German names are preferred, matching the app's
// primary audience.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::lookup::{
    FailureKind, LookupSource, ProductSource, ResolvedProduct, SourceFailure,
};
use crate::integrations::transport::HttpTransport;

/// Response envelope for /api/v2/product/{barcode}.json
#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    /// 1 when the barcode is known, 0 otherwise
    status: i32,
    /// Absent on unknown barcodes
    product: Option<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    brands: Option<String>,
    product_name: Option<String>,
    product_name_de: Option<String>,
    quantity: Option<String>,
}

/// Compose "brand name (quantity)" from whatever fields are populated.
/// The German name wins over the default one, but only an ABSENT German
/// field falls through - an empty one is kept and filtered with the rest.
fn compose_name(product: &ProductRecord) -> Option<String> {
    let mut components: Vec<String> = Vec::new();

    if let Some(brand) = &product.brands {
        components.push(brand.trim().to_string());
    }

    if let Some(name) = &product.product_name_de {
        components.push(name.trim().to_string());
    } else if let Some(name) = &product.product_name {
        components.push(name.trim().to_string());
    }

    if let Some(quantity) = &product.quantity {
        let quantity = quantity.trim();
        if !quantity.is_empty() {
            components.push(format!("({})", quantity));
        }
    }

    let name = components
        .into_iter()
        .filter(|component| !component.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Free JSON API source backed by the Open Food Facts database
pub struct OpenFoodFactsClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: String) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    fn failure(&self, kind: FailureKind, detail: impl Into<String>) -> SourceFailure {
        SourceFailure::new(ProductSource::OpenFoodFacts, kind, detail)
    }
}

#[async_trait]
impl LookupSource for OpenFoodFactsClient {
    fn source(&self) -> ProductSource {
        ProductSource::OpenFoodFacts
    }

    async fn lookup(&self, barcode: &str) -> Result<ResolvedProduct, SourceFailure> {
        let url = format!(
            "{}/api/v2/product/{}.json",
            self.base_url.trim_end_matches('/'),
            barcode
        );

        let response = self
            .transport
            .get(&url, &[])
            .await
            .map_err(|e| self.failure(FailureKind::TransportError, e.to_string()))?;

        if !response.is_success() {
            return Err(self.failure(
                FailureKind::InvalidResponse,
                format!("HTTP status {}", response.status),
            ));
        }

        let envelope: ProductEnvelope = serde_json::from_slice(&response.body)
            .map_err(|e| self.failure(FailureKind::ParseError, e.to_string()))?;

        if envelope.status == 0 {
            return Err(self.failure(FailureKind::NotFound, "status 0 for barcode"));
        }

        let product = match envelope.product {
            Some(product) => product,
            None => return Err(self.failure(FailureKind::NotFound, "no product record")),
        };

        match compose_name(&product) {
            Some(name) => Ok(ResolvedProduct::new(name, ProductSource::OpenFoodFacts)),
            None => Err(self.failure(FailureKind::NotFound, "record has no usable name fields")),
        }
    }
}
