//! Product repository (catalog reads).

use panier_core::{ProductId, SupplierId};
use sqlx::PgPool;

use super::RepositoryError;
use crate::models::product::Product;

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a supplier's listed products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, supplier_id, name, selling_price, supplier_price, is_listed
            FROM products
            WHERE supplier_id = $1 AND is_listed
            ORDER BY name
            ",
        )
        .bind(supplier_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Fetch the listed products of one supplier by ID set.
    ///
    /// Products belonging to another supplier are silently absent from the
    /// result; the caller decides whether that is an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_for_checkout(
        &self,
        supplier_id: SupplierId,
        product_ids: &[ProductId],
    ) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<i64> = product_ids.iter().map(|id| id.as_i64()).collect();
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, supplier_id, name, selling_price, supplier_price, is_listed
            FROM products
            WHERE supplier_id = $1 AND is_listed AND id = ANY($2)
            ",
        )
        .bind(supplier_id)
        .bind(&ids)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}
