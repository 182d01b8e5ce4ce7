// src/repositories/product_repository.rs
//
// Product persistence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::product::Product;
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait ProductRepository: Send + Sync {
    fn save(&self, product: &Product) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Product>>;
    /// Exact barcode match; oldest entry wins when duplicates exist
    fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Product>>;
    fn list_all(&self) -> AppResult<Vec<Product>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
    /// Wipe the catalog, returning how many rows were removed
    fn delete_all(&self) -> AppResult<usize>;
}

pub struct SqliteProductRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteProductRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Product - returns rusqlite::Error for query_map compatibility
    fn row_to_product(row: &Row) -> Result<Product, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let name: String = row.get("name")?;
        let price: f64 = row.get("price")?;
        let barcode: String = row.get("barcode")?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let updated_at_str: Option<String> = row.get("updated_at")?;
        let updated_at = updated_at_str
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        Ok(Product {
            id,
            name,
            price,
            barcode,
            created_at,
            updated_at,
        })
    }
}

impl ProductRepository for SqliteProductRepository {
    fn save(&self, product: &Product) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT OR REPLACE INTO products (
                id, name, price, barcode, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                product.id.to_string(),
                product.name,
                product.price,
                product.barcode,
                product.created_at.to_rfc3339(),
                product.updated_at.map(|dt| dt.to_rfc3339()),
            ],
        )?;

        Ok(())
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, price, barcode, created_at, updated_at
             FROM products WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_product) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_barcode(&self, barcode: &str) -> AppResult<Option<Product>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, price, barcode, created_at, updated_at
             FROM products
             WHERE barcode = ?1
             ORDER BY created_at
             LIMIT 1",
        )?;

        match stmt.query_row(params![barcode], Self::row_to_product) {
            Ok(product) => Ok(Some(product)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Product>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, price, barcode, created_at, updated_at
             FROM products
             ORDER BY name",
        )?;

        let products: Vec<Product> = stmt
            .query_map([], Self::row_to_product)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected =
            conn.execute("DELETE FROM products WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    fn delete_all(&self) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM products", [])?;

        Ok(rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool_at, initialize_database};

    fn test_repository() -> (tempfile::TempDir, SqliteProductRepository) {
        let dir = tempfile::tempdir().unwrap();
        let pool = Arc::new(create_pool_at(&dir.path().join("test.db")).unwrap());
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        (dir, SqliteProductRepository::new(pool))
    }

    #[test]
    fn test_save_and_find_by_barcode() {
        let (_dir, repo) = test_repository();

        let product = Product::new("Goldbears".to_string(), 1.29, "4001686301656".to_string());
        repo.save(&product).unwrap();

        let found = repo.find_by_barcode("4001686301656").unwrap().unwrap();
        assert_eq!(found.id, product.id);
        assert_eq!(found.name, "Goldbears");
        assert_eq!(found.price, 1.29);
    }

    #[test]
    fn test_find_by_barcode_misses_cleanly() {
        let (_dir, repo) = test_repository();
        assert!(repo.find_by_barcode("0000000000000").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_barcodes_return_oldest() {
        let (_dir, repo) = test_repository();

        let mut first = Product::new("First".to_string(), 1.0, "4001686301656".to_string());
        first.created_at = Utc::now() - chrono::Duration::days(1);
        let second = Product::new("Second".to_string(), 2.0, "4001686301656".to_string());

        repo.save(&second).unwrap();
        repo.save(&first).unwrap();

        let found = repo.find_by_barcode("4001686301656").unwrap().unwrap();
        assert_eq!(found.name, "First");
    }

    #[test]
    fn test_save_is_upsert() {
        let (_dir, repo) = test_repository();

        let mut product = Product::new("Goldbears".to_string(), 1.29, "4001686301656".to_string());
        repo.save(&product).unwrap();

        product.update(Some("Goldbears 200g".to_string()), Some(2.49));
        repo.save(&product).unwrap();

        let found = repo.get_by_id(product.id).unwrap().unwrap();
        assert_eq!(found.name, "Goldbears 200g");
        assert_eq!(found.price, 2.49);
        assert!(found.updated_at.is_some());
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_product_errors() {
        let (_dir, repo) = test_repository();
        assert!(matches!(
            repo.delete(Uuid::new_v4()),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_delete_all_reports_count() {
        let (_dir, repo) = test_repository();

        repo.save(&Product::new("A".to_string(), 1.0, "1".to_string()))
            .unwrap();
        repo.save(&Product::new("B".to_string(), 2.0, "2".to_string()))
            .unwrap();

        assert_eq!(repo.delete_all().unwrap(), 2);
        assert!(repo.list_all().unwrap().is_empty());
    }
}
