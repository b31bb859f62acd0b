//! Checkout: pricing a cart and freezing it into an order.
//!
//! The service re-reads the pricing settings, re-validates the promo code
//! against live partner state, prices every line, and persists the result
//! in one transaction. All money figures on the order are frozen here and
//! never recomputed afterwards; later aggregation passes read them back.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{info, instrument};

use panier_core::{BenefitInput, PricingSettings, PromoStatus, compute_benefit};

use crate::db::{OrderRepository, PartnerRepository, PricingSettingsRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::order::{AppliedPromo, CheckoutRequest, Order, PricedLine, PricedOrder};
use crate::models::partner::Partner;
use crate::models::product::Product;

/// Service driving the checkout flow.
pub struct CheckoutService<'a> {
    pool: &'a PgPool,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Price the cart and create the order.
    ///
    /// # Errors
    ///
    /// - `BadRequest` for an empty cart, non-positive quantity or unknown
    ///   product;
    /// - `PromoInvalid` if the promo code no longer resolves to an active
    ///   partner (the order is not created);
    /// - `Database` if any read or the final insert fails.
    #[instrument(skip(self, request), fields(client = %request.client_id, supplier = %request.supplier_id))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<Order> {
        if request.lines.is_empty() {
            return Err(AppError::BadRequest("cart is empty".to_string()));
        }
        if request.lines.iter().any(|line| line.quantity <= 0) {
            return Err(AppError::BadRequest(
                "line quantity must be positive".to_string(),
            ));
        }

        // Settings are read fresh on every checkout; an admin edit takes
        // effect on the next call.
        let settings = PricingSettingsRepository::new(self.pool).load().await?;

        // Re-validate the promo code immediately before order creation: the
        // partner may have been deleted or deactivated since the cart was
        // built. This is the one validation that blocks checkout.
        let partner = match request.promo_code.as_deref() {
            None => None,
            Some(code) => {
                let partner = PartnerRepository::new(self.pool)
                    .get_by_code(code)
                    .await?
                    .filter(|partner| partner.is_active)
                    .ok_or_else(|| AppError::PromoInvalid(code.to_string()))?;
                Some(partner)
            }
        };

        let product_ids: Vec<_> = request.lines.iter().map(|line| line.product_id).collect();
        let products = ProductRepository::new(self.pool)
            .get_for_checkout(request.supplier_id, &product_ids)
            .await?;

        let priced = price_order(&request, &products, partner.as_ref(), &settings)?;

        let order = OrderRepository::new(self.pool).create(priced).await?;
        info!(
            order = %order.id,
            total = %order.grand_total,
            promo = order.promo.as_ref().map_or("none", |p| p.code.as_str()),
            "Order created"
        );
        Ok(order)
    }
}

/// Price a cart into an order draft. Pure: no I/O, deterministic except for
/// the promo `applied_at` timestamp.
///
/// Per line, with a partner: one benefit computation on the unit prices,
/// scaled by quantity. Without a partner there is no discount or commission
/// and the platform keeps the entire confidential margin. Either way the
/// frozen `platform_debt` is `margin - commission - discount`, summed over
/// the lines.
fn price_order(
    request: &CheckoutRequest,
    products: &[Product],
    partner: Option<&Partner>,
    settings: &PricingSettings,
) -> Result<PricedOrder> {
    let by_id: HashMap<_, _> = products.iter().map(|product| (product.id, product)).collect();

    let mut lines = Vec::with_capacity(request.lines.len());
    let mut items_total = Decimal::ZERO;
    let mut discount_total = Decimal::ZERO;
    let mut commission_total = Decimal::ZERO;
    let mut gain_total = Decimal::ZERO;
    let mut platform_debt = Decimal::ZERO;

    for line in &request.lines {
        let product = by_id.get(&line.product_id).ok_or_else(|| {
            AppError::BadRequest(format!("unknown product {} in cart", line.product_id))
        })?;
        let quantity = Decimal::from(line.quantity);

        // Missing supplier cost is normalized to zero here, at the pricing
        // boundary, not deeper in the arithmetic.
        let input = BenefitInput::from_raw(
            Some(product.selling_price),
            product.supplier_price,
            partner.map(|p| p.total_sales),
        );

        items_total += product.selling_price * quantity;

        let line_discount = if partner.is_some() {
            let benefit = compute_benefit(&input, settings);
            discount_total += benefit.client_discount * quantity;
            commission_total += benefit.partner_commission * quantity;
            gain_total += benefit.platform_gain * quantity;
            platform_debt += benefit.platform_gain * quantity;
            benefit.client_discount * quantity
        } else {
            // No promo: the whole confidential margin is the platform's.
            platform_debt += (input.selling_price - input.buying_price) * quantity;
            Decimal::ZERO
        };

        lines.push(PricedLine {
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.selling_price,
            supplier_price: input.buying_price,
            quantity: line.quantity,
            line_discount,
        });
    }

    let delivery_fee = request.delivery_fee.unwrap_or_default();
    let promo = partner.map(|partner| AppliedPromo {
        code: partner.promo_code.clone(),
        partner_id: partner.id,
        partner_level: settings.levels.resolve(partner.total_sales).level,
        discount_amount: discount_total,
        partner_commission: commission_total,
        platform_gain: gain_total,
        status: PromoStatus::Applied,
        applied_at: Utc::now(),
    });

    Ok(PricedOrder {
        client_id: request.client_id,
        supplier_id: request.supplier_id,
        delivery_fee,
        platform_debt,
        items_total,
        grand_total: items_total - discount_total + delivery_fee,
        promo,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use panier_core::{ClientId, PartnerId, PartnerLevel, ProductId, SupplierId};

    use super::*;
    use crate::models::order::CheckoutLine;

    fn product(id: i64, selling: i64, cost: Option<i64>) -> Product {
        Product {
            id: ProductId::new(id),
            supplier_id: SupplierId::new(1),
            name: format!("eclair-{id}"),
            selling_price: Decimal::from(selling),
            supplier_price: cost.map(Decimal::from),
            is_listed: true,
        }
    }

    fn partner(total_sales: i64) -> Partner {
        Partner {
            id: PartnerId::new(7),
            display_name: "Awa".to_string(),
            promo_code: "AWA-2024".to_string(),
            total_sales,
            level: PartnerLevel::Standard,
            wallet_balance: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            is_active: true,
        }
    }

    fn request(lines: Vec<CheckoutLine>, promo: bool) -> CheckoutRequest {
        CheckoutRequest {
            client_id: ClientId::new(3),
            supplier_id: SupplierId::new(1),
            delivery_fee: Some(Decimal::from(1000)),
            promo_code: promo.then(|| "AWA-2024".to_string()),
            lines,
        }
    }

    fn line(product_id: i64, quantity: i64) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }

    #[test]
    fn test_promo_order_freezes_benefit_figures() {
        // Worked example: 6000/3000 with base margin 1000 and 30/20 split
        // gives 750 commission, 550 discount, 1700 gain per unit.
        let settings = PricingSettings::default();
        let products = vec![product(1, 6000, Some(3000))];
        let partner = partner(0);

        let priced = price_order(
            &request(vec![line(1, 2)], true),
            &products,
            Some(&partner),
            &settings,
        )
        .unwrap();

        let promo = priced.promo.expect("promo should be frozen");
        assert_eq!(promo.partner_commission, Decimal::from(1500));
        assert_eq!(promo.discount_amount, Decimal::from(1100));
        assert_eq!(promo.platform_gain, Decimal::from(3400));
        assert_eq!(promo.partner_level, PartnerLevel::Standard);
        // Validation happens on delivery, never at checkout.
        assert_eq!(promo.status, PromoStatus::Applied);

        assert_eq!(priced.platform_debt, Decimal::from(3400));
        assert_eq!(priced.items_total, Decimal::from(12_000));
        // items - discount + delivery
        assert_eq!(priced.grand_total, Decimal::from(12_000 - 1100 + 1000));
    }

    #[test]
    fn test_order_without_promo_keeps_full_margin_as_debt() {
        let settings = PricingSettings::default();
        let products = vec![product(1, 6000, Some(3000))];

        let priced = price_order(&request(vec![line(1, 2)], false), &products, None, &settings)
            .unwrap();

        assert!(priced.promo.is_none());
        assert_eq!(priced.platform_debt, Decimal::from(6000));
        assert_eq!(priced.grand_total, Decimal::from(13_000));
        assert!(priced.lines.iter().all(|l| l.line_discount.is_zero()));
    }

    #[test]
    fn test_missing_supplier_cost_normalized_to_zero() {
        let settings = PricingSettings::default();
        let products = vec![product(1, 2000, None)];

        let priced = price_order(&request(vec![line(1, 1)], false), &products, None, &settings)
            .unwrap();

        // Cost unknown: margin defaults to the full selling price.
        assert_eq!(priced.platform_debt, Decimal::from(2000));
        assert_eq!(priced.lines[0].supplier_price, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let settings = PricingSettings::default();
        let products = vec![product(1, 2000, Some(1000))];

        let result = price_order(&request(vec![line(9, 1)], false), &products, None, &settings);
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_partner_level_resolved_from_sales_count() {
        let settings = PricingSettings::default();
        let products = vec![product(1, 2000, Some(1500))];
        let partner = partner(160);

        let priced = price_order(
            &request(vec![line(1, 1)], true),
            &products,
            Some(&partner),
            &settings,
        )
        .unwrap();

        assert_eq!(
            priced.promo.expect("promo").partner_level,
            PartnerLevel::Premium
        );
    }
}
