// src/services/catalog_service.rs
//
// Catalog Service
//
// CRUD over the user's product catalog. This is the layer that persists
// a remotely resolved name once the caller decides to keep it; the
// lookup chain itself never writes here.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::product::{validate_product, Product};
use crate::error::{AppError, AppResult};
use crate::events::{CatalogReset, EventBus, ProductRegistered, ProductRemoved, ProductUpdated};
use crate::repositories::ProductRepository;

#[derive(Debug, Clone)]
pub struct RegisterProductRequest {
    pub name: String,
    pub price: f64,
    pub barcode: String,
}

#[derive(Debug, Clone)]
pub struct UpdateProductRequest {
    pub id: Uuid,
    pub name: Option<String>,
    pub price: Option<f64>,
}

pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(products: Arc<dyn ProductRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            products,
            event_bus,
        }
    }

    /// Validate and persist a new product
    pub fn register_product(&self, request: RegisterProductRequest) -> AppResult<Product> {
        let product = Product::new(request.name, request.price, request.barcode);

        validate_product(&product).map_err(AppError::Domain)?;

        self.products.save(&product)?;

        self.event_bus.emit(ProductRegistered::new(
            product.id,
            product.name.clone(),
            product.barcode.clone(),
        ));

        Ok(product)
    }

    /// Update name and/or price of an existing product
    pub fn update_product(&self, request: UpdateProductRequest) -> AppResult<Product> {
        let mut product = self
            .products
            .get_by_id(request.id)?
            .ok_or(AppError::NotFound)?;

        product.update(request.name, request.price);

        validate_product(&product).map_err(AppError::Domain)?;

        self.products.save(&product)?;

        self.event_bus.emit(ProductUpdated::new(product.id));

        Ok(product)
    }

    /// Remove one product from the catalog
    pub fn remove_product(&self, id: Uuid) -> AppResult<()> {
        self.products.delete(id)?;
        self.event_bus.emit(ProductRemoved::new(id));
        Ok(())
    }

    pub fn list_products(&self) -> AppResult<Vec<Product>> {
        self.products.list_all()
    }

    pub fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Product>> {
        self.products.find_by_barcode(barcode)
    }

    /// Wipe the catalog (the settings screen's data-reset action)
    pub fn reset_catalog(&self) -> AppResult<usize> {
        let removed = self.products.delete_all()?;
        self.event_bus.emit(CatalogReset::new(removed));
        Ok(removed)
    }
}
