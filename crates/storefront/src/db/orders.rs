//! Order repository: creation at checkout and client-facing reads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use panier_core::{
    ClientId, OrderId, OrderStatus, PartnerId, PartnerLevel, PromoStatus, SettlementStatus,
    SupplierId,
};

use super::RepositoryError;
use crate::models::order::{AppliedPromo, Order, OrderLine, PricedOrder};

/// Flat database row for an order header.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    client_id: ClientId,
    supplier_id: SupplierId,
    status: OrderStatus,
    settlement_status: SettlementStatus,
    delivery_fee: Decimal,
    platform_debt: Decimal,
    items_total: Decimal,
    grand_total: Decimal,
    promo_code: Option<String>,
    partner_id: Option<PartnerId>,
    partner_level: Option<PartnerLevel>,
    discount_amount: Option<Decimal>,
    partner_commission: Option<Decimal>,
    platform_gain: Option<Decimal>,
    promo_status: Option<PromoStatus>,
    promo_applied_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Result<Order, RepositoryError> {
        let promo = match self.promo_code {
            None => None,
            Some(code) => {
                // The promo sub-record is written atomically; a partial one
                // means the row was tampered with.
                let (Some(partner_id), Some(partner_level), Some(status), Some(applied_at)) = (
                    self.partner_id,
                    self.partner_level,
                    self.promo_status,
                    self.promo_applied_at,
                ) else {
                    return Err(RepositoryError::DataCorruption(format!(
                        "order {} has a partial promo sub-record",
                        self.id
                    )));
                };
                Some(AppliedPromo {
                    code,
                    partner_id,
                    partner_level,
                    discount_amount: self.discount_amount.unwrap_or_default(),
                    partner_commission: self.partner_commission.unwrap_or_default(),
                    platform_gain: self.platform_gain.unwrap_or_default(),
                    status,
                    applied_at,
                })
            }
        };

        Ok(Order {
            id: self.id,
            client_id: self.client_id,
            supplier_id: self.supplier_id,
            status: self.status,
            settlement_status: self.settlement_status,
            delivery_fee: self.delivery_fee,
            platform_debt: self.platform_debt,
            items_total: self.items_total,
            grand_total: self.grand_total,
            promo,
            created_at: self.created_at,
            lines,
        })
    }
}

const SELECT_ORDER: &str = r"
    SELECT id, client_id, supplier_id, status, settlement_status,
           delivery_fee, platform_debt, items_total, grand_total,
           promo_code, partner_id, partner_level, discount_amount,
           partner_commission, platform_gain, promo_status, promo_applied_at,
           created_at
    FROM orders
";

const SELECT_LINES: &str = r"
    SELECT product_id, product_name, unit_price, supplier_price, quantity, line_discount
    FROM order_lines
    WHERE order_id = $1
    ORDER BY id
";

/// Repository for order creation and reads.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a priced order draft: header, promo sub-record and lines in
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// persisted in that case.
    pub async fn create(&self, priced: PricedOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (
                client_id, supplier_id, delivery_fee, platform_debt,
                items_total, grand_total,
                promo_code, partner_id, partner_level, discount_amount,
                partner_commission, platform_gain, promo_status, promo_applied_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, client_id, supplier_id, status, settlement_status,
                      delivery_fee, platform_debt, items_total, grand_total,
                      promo_code, partner_id, partner_level, discount_amount,
                      partner_commission, platform_gain, promo_status,
                      promo_applied_at, created_at
            ",
        )
        .bind(priced.client_id)
        .bind(priced.supplier_id)
        .bind(priced.delivery_fee)
        .bind(priced.platform_debt)
        .bind(priced.items_total)
        .bind(priced.grand_total)
        .bind(priced.promo.as_ref().map(|p| p.code.clone()))
        .bind(priced.promo.as_ref().map(|p| p.partner_id))
        .bind(priced.promo.as_ref().map(|p| p.partner_level))
        .bind(priced.promo.as_ref().map(|p| p.discount_amount))
        .bind(priced.promo.as_ref().map(|p| p.partner_commission))
        .bind(priced.promo.as_ref().map(|p| p.platform_gain))
        .bind(priced.promo.as_ref().map(|p| p.status))
        .bind(priced.promo.as_ref().map(|p| p.applied_at))
        .fetch_one(&mut *tx)
        .await?;

        let mut lines = Vec::with_capacity(priced.lines.len());
        for line in priced.lines {
            let persisted = sqlx::query_as::<_, OrderLine>(
                r"
                INSERT INTO order_lines (
                    order_id, product_id, product_name, unit_price,
                    supplier_price, quantity, line_discount
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING product_id, product_name, unit_price, supplier_price,
                          quantity, line_discount
                ",
            )
            .bind(row.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.unit_price)
            .bind(line.supplier_price)
            .bind(line.quantity)
            .bind(line.line_discount)
            .fetch_one(&mut *tx)
            .await?;
            lines.push(persisted);
        }

        tx.commit().await?;

        row.into_order(lines)
    }

    /// Fetch one order with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let query = format!("{SELECT_ORDER} WHERE id = $1");
        let Some(row) = sqlx::query_as::<_, OrderRow>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
        else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLine>(SELECT_LINES)
            .bind(id)
            .fetch_all(self.pool)
            .await?;

        row.into_order(lines).map(Some)
    }

    /// List a client's orders, newest first, without lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_client(&self, client_id: ClientId) -> Result<Vec<Order>, RepositoryError> {
        let query = format!("{SELECT_ORDER} WHERE client_id = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(client_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter()
            .map(|row| row.into_order(Vec::new()))
            .collect()
    }
}
