//! Order repository: supplier listings, lifecycle transitions, settlement
//! marking and financial views for aggregation.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::PgPool;

use panier_core::{
    LineFinancialView, OrderFinancialView, OrderId, OrderStatus, SettlementStatus, SupplierId,
};

use super::RepositoryError;
use crate::models::order::OrderSummary;

const SUMMARY_COLUMNS: &str = "id, client_id, supplier_id, status, settlement_status, \
     delivery_fee, platform_debt, items_total, grand_total, \
     promo_code, partner_id, partner_level, partner_commission, promo_status, created_at";

/// Repository for order administration.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List one supplier's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<OrderSummary>, RepositoryError> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM orders WHERE supplier_id = $1 ORDER BY created_at DESC"
        );
        let orders = sqlx::query_as::<_, OrderSummary>(&query)
            .bind(supplier_id)
            .fetch_all(self.pool)
            .await?;
        Ok(orders)
    }

    /// Fetch one order summary.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_summary(
        &self,
        order_id: OrderId,
    ) -> Result<Option<OrderSummary>, RepositoryError> {
        let query = format!("SELECT {SUMMARY_COLUMNS} FROM orders WHERE id = $1");
        let order = sqlx::query_as::<_, OrderSummary>(&query)
            .bind(order_id)
            .fetch_optional(self.pool)
            .await?;
        Ok(order)
    }

    /// Load one supplier's orders in the shape the settlement accumulator
    /// consumes. The status/settlement filtering happens in the pure fold,
    /// not here, so the aggregation logic stays in one place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn financial_views(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<OrderFinancialView>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct HeaderRow {
            id: OrderId,
            status: OrderStatus,
            settlement_status: SettlementStatus,
            platform_debt: Decimal,
            delivery_fee: Decimal,
        }

        #[derive(sqlx::FromRow)]
        struct LineRow {
            order_id: OrderId,
            supplier_price: Decimal,
            quantity: i64,
        }

        let headers = sqlx::query_as::<_, HeaderRow>(
            r"
            SELECT id, status, settlement_status, platform_debt, delivery_fee
            FROM orders
            WHERE supplier_id = $1
            ORDER BY id
            ",
        )
        .bind(supplier_id)
        .fetch_all(self.pool)
        .await?;

        let lines = sqlx::query_as::<_, LineRow>(
            r"
            SELECT l.order_id, l.supplier_price, l.quantity
            FROM order_lines l
            JOIN orders o ON o.id = l.order_id
            WHERE o.supplier_id = $1
            ",
        )
        .bind(supplier_id)
        .fetch_all(self.pool)
        .await?;

        let mut by_order: HashMap<OrderId, Vec<LineFinancialView>> = HashMap::new();
        for line in lines {
            by_order
                .entry(line.order_id)
                .or_default()
                .push(LineFinancialView {
                    supplier_price: line.supplier_price,
                    quantity: line.quantity,
                });
        }

        Ok(headers
            .into_iter()
            .map(|header| OrderFinancialView {
                status: header.status,
                settlement_status: header.settlement_status,
                platform_debt: header.platform_debt,
                delivery_fee: header.delivery_fee,
                lines: by_order.remove(&header.id).unwrap_or_default(),
            })
            .collect())
    }

    /// Move an order through its lifecycle.
    ///
    /// The current status is read under a row lock and the transition is
    /// validated against the lifecycle rules before the update.
    ///
    /// # Errors
    ///
    /// - `RepositoryError::NotFound` if the order does not exist;
    /// - `RepositoryError::Conflict` if the lifecycle forbids the move;
    /// - `RepositoryError::Database` on query failure.
    pub async fn transition(
        &self,
        order_id: OrderId,
        next: OrderStatus,
    ) -> Result<OrderSummary, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, OrderStatus>(
            "SELECT status FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepositoryError::NotFound(format!("order {order_id}")))?;

        if !current.can_transition_to(next) {
            return Err(RepositoryError::Conflict(format!(
                "order {order_id} cannot move from {current} to {next}"
            )));
        }

        let query = format!(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 \
             RETURNING {SUMMARY_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, OrderSummary>(&query)
            .bind(order_id)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Flip an order's promo sub-record to `validated`.
    ///
    /// A no-op for orders without a promo.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn validate_promo(&self, order_id: OrderId) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            UPDATE orders
            SET promo_status = 'validated', updated_at = now()
            WHERE id = $1 AND promo_code IS NOT NULL
            ",
        )
        .bind(order_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Mark all of a supplier's counted, unsettled orders as paid.
    ///
    /// Returns the number of orders settled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn settle_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE orders
            SET settlement_status = 'paid', updated_at = now()
            WHERE supplier_id = $1
              AND settlement_status = 'pending'
              AND status IN ('shipping', 'delivered', 'completed')
            ",
        )
        .bind(supplier_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
