//! Supplier repository.

use sqlx::PgPool;

use panier_core::SupplierId;

use super::RepositoryError;
use crate::models::supplier::Supplier;

/// Repository for suppliers.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    /// Create a new supplier repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all suppliers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, is_active FROM suppliers ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(suppliers)
    }

    /// Fetch one supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: SupplierId) -> Result<Option<Supplier>, RepositoryError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, is_active FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(supplier)
    }
}
