//! Order models as the admin sees them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use panier_core::{
    ClientId, OrderId, OrderStatus, PartnerId, PartnerLevel, PromoStatus, SettlementStatus,
    SupplierId,
};

/// Flat order summary for supplier and back-office listings.
///
/// Carries the frozen financial figures; nothing here is ever recomputed.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderSummary {
    /// Unique order ID.
    pub id: OrderId,
    /// Ordering client.
    pub client_id: ClientId,
    /// Supplier the order is placed with.
    pub supplier_id: SupplierId,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Settlement status of the platform debt.
    pub settlement_status: SettlementStatus,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Margin owed to the platform, frozen at pricing time.
    pub platform_debt: Decimal,
    /// Sum of `unit_price * quantity` over all lines.
    pub items_total: Decimal,
    /// Total the client pays.
    pub grand_total: Decimal,
    /// Applied promo code, if any.
    pub promo_code: Option<String>,
    /// Partner owning the promo code.
    pub partner_id: Option<PartnerId>,
    /// Level frozen at checkout.
    pub partner_level: Option<PartnerLevel>,
    /// Commission frozen at checkout.
    pub partner_commission: Option<Decimal>,
    /// `Applied` until the order is delivered, then `Validated`.
    pub promo_status: Option<PromoStatus>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}
