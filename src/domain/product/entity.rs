use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogued grocery product, keyed by its scanned barcode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Human-readable product name shown in the basket
    pub name: String,

    /// Unit price entered by the user
    pub price: f64,

    /// Scanner-decoded identifier (EAN-8/EAN-13/UPC-E digit string)
    pub barcode: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp (None until the first edit)
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a new Product entity
    pub fn new(name: String, price: f64, barcode: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
            barcode,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Update name and/or price
    /// This preserves the creation timestamp and stamps the modification time
    pub fn update(&mut self, name: Option<String>, price: Option<f64>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(price) = price {
            self.price = price;
        }
        self.updated_at = Some(Utc::now());
    }
}
