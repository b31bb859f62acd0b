//! Persisted supplier financial snapshots.
//!
//! The snapshot row is a display cache of the aggregation over the live
//! orders; it is rewritten by the settlement feed when the recomputed
//! totals move past the configured threshold, and the live computation
//! always wins for display.

use rust_decimal::Decimal;
use sqlx::PgPool;

use panier_core::{SupplierFinancials, SupplierId};

use super::RepositoryError;

#[derive(sqlx::FromRow)]
struct SnapshotRow {
    platform_debt: Decimal,
    product_earnings: Decimal,
    delivery_earnings: Decimal,
    total_earnings: Decimal,
}

/// Repository for the `supplier_financials` snapshot table.
pub struct FinancialSnapshotRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FinancialSnapshotRepository<'a> {
    /// Create a new snapshot repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the last persisted snapshot for a supplier, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn load(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Option<SupplierFinancials>, RepositoryError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            r"
            SELECT platform_debt, product_earnings, delivery_earnings, total_earnings
            FROM supplier_financials
            WHERE supplier_id = $1
            ",
        )
        .bind(supplier_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|row| SupplierFinancials {
            platform_debt: row.platform_debt,
            product_earnings: row.product_earnings,
            delivery_earnings: row.delivery_earnings,
            total_earnings: row.total_earnings,
        }))
    }

    /// Write (or overwrite) a supplier's snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(
        &self,
        supplier_id: SupplierId,
        financials: &SupplierFinancials,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO supplier_financials
                (supplier_id, platform_debt, product_earnings, delivery_earnings,
                 total_earnings, computed_at)
            VALUES ($1, $2, $3, $4, $5, now())
            ON CONFLICT (supplier_id) DO UPDATE
            SET platform_debt = EXCLUDED.platform_debt,
                product_earnings = EXCLUDED.product_earnings,
                delivery_earnings = EXCLUDED.delivery_earnings,
                total_earnings = EXCLUDED.total_earnings,
                computed_at = EXCLUDED.computed_at
            ",
        )
        .bind(supplier_id)
        .bind(financials.platform_debt)
        .bind(financials.product_earnings)
        .bind(financials.delivery_earnings)
        .bind(financials.total_earnings)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
