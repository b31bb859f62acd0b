//! Order models: API inputs, the priced draft and the persisted order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use panier_core::{
    ClientId, OrderId, OrderStatus, PartnerId, PartnerLevel, ProductId, PromoStatus,
    SettlementStatus, SupplierId,
};

/// Checkout request body.
///
/// Prices are never taken from the client; the service reads them from the
/// catalog. `delivery_fee` is optional and defaults to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    /// Ordering client.
    pub client_id: ClientId,
    /// Supplier the order is placed with (one order per supplier).
    pub supplier_id: SupplierId,
    /// Delivery fee quoted for this order.
    pub delivery_fee: Option<Decimal>,
    /// Partner promo code, if the client entered one.
    pub promo_code: Option<String>,
    /// Cart lines.
    pub lines: Vec<CheckoutLine>,
}

/// One cart line of a checkout request.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CheckoutLine {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: i64,
}

/// Promo figures frozen into an order at submission.
///
/// Computed once at checkout; never recomputed after persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedPromo {
    /// The promo code that was applied.
    pub code: String,
    /// Partner owning the code.
    pub partner_id: PartnerId,
    /// Level the partner's sales count resolved to at checkout time.
    pub partner_level: PartnerLevel,
    /// Total client discount across all lines.
    pub discount_amount: Decimal,
    /// Total partner commission across all lines.
    pub partner_commission: Decimal,
    /// Total platform gain across all lines.
    pub platform_gain: Decimal,
    /// `Applied` at checkout; the admin flips it to `Validated` on delivery.
    pub status: PromoStatus,
    /// When the promo was applied.
    pub applied_at: DateTime<Utc>,
}

/// A priced order line, ready to persist.
#[derive(Debug, Clone)]
pub struct PricedLine {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Public unit price.
    pub unit_price: Decimal,
    /// Confidential supplier unit price (missing cost normalized to zero).
    pub supplier_price: Decimal,
    /// Units ordered.
    pub quantity: i64,
    /// Client discount on this line (zero without a promo).
    pub line_discount: Decimal,
}

/// A fully priced order draft, output of the checkout pricing step.
#[derive(Debug, Clone)]
pub struct PricedOrder {
    /// Ordering client.
    pub client_id: ClientId,
    /// Supplier the order is placed with.
    pub supplier_id: SupplierId,
    /// Delivery fee.
    pub delivery_fee: Decimal,
    /// Margin owed to the platform, frozen at pricing time.
    pub platform_debt: Decimal,
    /// Sum of `unit_price * quantity` over all lines.
    pub items_total: Decimal,
    /// `items_total - discount + delivery_fee`.
    pub grand_total: Decimal,
    /// Frozen promo figures, when a code was applied.
    pub promo: Option<AppliedPromo>,
    /// Priced lines.
    pub lines: Vec<PricedLine>,
}

/// A persisted order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
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
    /// Frozen promo figures, when a code was applied.
    pub promo: Option<AppliedPromo>,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// Persisted lines.
    pub lines: Vec<OrderLine>,
}

/// A persisted order line.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    /// Product ordered.
    pub product_id: ProductId,
    /// Product name at order time.
    pub product_name: String,
    /// Public unit price.
    pub unit_price: Decimal,
    /// Confidential supplier unit price.
    #[serde(skip_serializing)]
    pub supplier_price: Decimal,
    /// Units ordered.
    pub quantity: i64,
    /// Client discount on this line.
    pub line_discount: Decimal,
}
