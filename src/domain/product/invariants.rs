use super::entity::Product;
use crate::domain::{DomainError, DomainResult};

/// Validates all Product invariants
/// These are the absolute rules that must hold for a Product to be valid
pub fn validate_product(product: &Product) -> DomainResult<()> {
    validate_name(&product.name)?;
    validate_barcode(&product.barcode)?;
    validate_price(product.price)?;
    Ok(())
}

/// Name cannot be empty
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Product name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Barcode cannot be empty; no structural validation beyond presence
fn validate_barcode(barcode: &str) -> DomainResult<()> {
    if barcode.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Product barcode cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Price cannot be negative
fn validate_price(price: f64) -> DomainResult<()> {
    if price < 0.0 || !price.is_finite() {
        return Err(DomainError::InvariantViolation(format!(
            "Product price {} is not a valid amount",
            price
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Product domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Name cannot be empty
/// 3. Barcode cannot be empty (structure is the scanner's concern)
/// 4. Price is finite and non-negative
/// 5. Created timestamp never changes
/// 6. Updated timestamp reflects last modification
