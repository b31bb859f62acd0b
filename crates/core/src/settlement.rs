//! Per-supplier financial aggregation over an order snapshot.
//!
//! A supplier owes the platform the margin frozen into each counted order
//! (`platform_debt`) plus 10% of the delivery fee; the remaining 90% of the
//! fee and the full supplier price of every line are the supplier's own
//! earnings. Settled (`Paid`) orders drop out of the debt but keep their
//! earnings.
//!
//! [`aggregate_supplier_financials`] is a pure fold over the current order
//! snapshot: re-running it on an unchanged snapshot yields identical
//! results, so callers re-run it on every change notification. The caller
//! pre-filters the snapshot to a single supplier's orders.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OrderStatus, SettlementStatus};

/// Platform's fraction of each delivery fee.
fn delivery_platform_share() -> Decimal {
    Decimal::new(10, 2)
}

/// Supplier's fraction of each delivery fee.
fn delivery_supplier_share() -> Decimal {
    Decimal::new(90, 2)
}

/// The financial fields of one order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineFinancialView {
    /// Confidential supplier unit price.
    pub supplier_price: Decimal,
    /// Units ordered.
    pub quantity: i64,
}

/// The financial fields of one order, as the accumulator sees them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFinancialView {
    /// Lifecycle status; only shipping/delivered/completed orders count.
    pub status: OrderStatus,
    /// Settlement status; `Paid` orders are excluded from debt only.
    pub settlement_status: SettlementStatus,
    /// Margin owed to the platform, frozen at pricing time.
    pub platform_debt: Decimal,
    /// Delivery fee charged on the order.
    pub delivery_fee: Decimal,
    /// Line items.
    pub lines: Vec<LineFinancialView>,
}

/// Aggregated financial position of one supplier.
///
/// Derived and re-derivable: the persisted copy of this struct is a
/// display-only cache, never the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SupplierFinancials {
    /// Outstanding debt owed to the platform (unsettled counted orders).
    pub platform_debt: Decimal,
    /// Supplier earnings from product sales.
    pub product_earnings: Decimal,
    /// Supplier earnings from delivery fees (90% share).
    pub delivery_earnings: Decimal,
    /// `product_earnings + delivery_earnings`.
    pub total_earnings: Decimal,
}

impl SupplierFinancials {
    /// Whether any component differs from `other` by more than `threshold`.
    ///
    /// Used by the snapshot write-back to avoid a database write for every
    /// recomputation; the freshly computed value stays authoritative for
    /// display either way.
    #[must_use]
    pub fn differs_materially(&self, other: &Self, threshold: Decimal) -> bool {
        [
            self.platform_debt - other.platform_debt,
            self.product_earnings - other.product_earnings,
            self.delivery_earnings - other.delivery_earnings,
            self.total_earnings - other.total_earnings,
        ]
        .iter()
        .any(|delta| delta.abs() > threshold)
    }
}

/// Fold one supplier's order snapshot into their financial position.
///
/// Per order: skip unless the status counts for finance; accumulate
/// `platform_debt + delivery_fee * 10%` as debt unless already settled;
/// accumulate `supplier_price * quantity` per line and `delivery_fee * 90%`
/// as earnings regardless of settlement. The two delivery shares are exact
/// decimal fractions of the fee, never rounded per half, so together they
/// always reconstruct the full fee.
#[must_use]
pub fn aggregate_supplier_financials<I>(orders: I) -> SupplierFinancials
where
    I: IntoIterator<Item = OrderFinancialView>,
{
    let mut totals = SupplierFinancials::default();

    for order in orders {
        if !order.status.counts_for_finance() {
            continue;
        }

        if order.settlement_status != SettlementStatus::Paid {
            totals.platform_debt +=
                order.platform_debt + order.delivery_fee * delivery_platform_share();
        }

        for line in &order.lines {
            totals.product_earnings += line.supplier_price * Decimal::from(line.quantity);
        }
        totals.delivery_earnings += order.delivery_fee * delivery_supplier_share();
    }

    totals.total_earnings = totals.product_earnings + totals.delivery_earnings;
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(
        status: OrderStatus,
        settlement: SettlementStatus,
        platform_debt: i64,
        delivery_fee: i64,
        lines: &[(i64, i64)],
    ) -> OrderFinancialView {
        OrderFinancialView {
            status,
            settlement_status: settlement,
            platform_debt: Decimal::from(platform_debt),
            delivery_fee: Decimal::from(delivery_fee),
            lines: lines
                .iter()
                .map(|&(supplier_price, quantity)| LineFinancialView {
                    supplier_price: Decimal::from(supplier_price),
                    quantity,
                })
                .collect(),
        }
    }

    #[test]
    fn test_only_counted_statuses_contribute() {
        let orders = vec![
            order(
                OrderStatus::Pending,
                SettlementStatus::Pending,
                500,
                1000,
                &[(2000, 1)],
            ),
            order(
                OrderStatus::Preparing,
                SettlementStatus::Pending,
                500,
                1000,
                &[(2000, 1)],
            ),
            order(
                OrderStatus::Cancelled,
                SettlementStatus::Pending,
                500,
                1000,
                &[(2000, 1)],
            ),
            order(
                OrderStatus::Shipping,
                SettlementStatus::Pending,
                500,
                1000,
                &[(2000, 1)],
            ),
        ];

        let totals = aggregate_supplier_financials(orders);
        // Only the shipping order: debt 500 + 100, product 2000, delivery 900.
        assert_eq!(totals.platform_debt, Decimal::from(600));
        assert_eq!(totals.product_earnings, Decimal::from(2000));
        assert_eq!(totals.delivery_earnings, Decimal::from(900));
        assert_eq!(totals.total_earnings, Decimal::from(2900));
    }

    #[test]
    fn test_settled_orders_keep_earnings_but_lose_debt() {
        let totals = aggregate_supplier_financials(vec![order(
            OrderStatus::Delivered,
            SettlementStatus::Paid,
            750,
            1000,
            &[(3000, 2)],
        )]);
        assert_eq!(totals.platform_debt, Decimal::ZERO);
        assert_eq!(totals.product_earnings, Decimal::from(6000));
        assert_eq!(totals.delivery_earnings, Decimal::from(900));
        assert_eq!(totals.total_earnings, Decimal::from(6900));
    }

    #[test]
    fn test_delivery_split_reconstructs_fee_exactly() {
        // Sweep fees, including values where 10% is fractional: the two
        // shares must always sum back to the exact fee.
        for fee in 0..2000 {
            let fee = Decimal::from(fee);
            let debt_share = fee * delivery_platform_share();
            let earnings_share = fee * delivery_supplier_share();
            assert_eq!(debt_share + earnings_share, fee, "split lost units at {fee}");
        }
    }

    #[test]
    fn test_line_quantities_multiply() {
        let totals = aggregate_supplier_financials(vec![order(
            OrderStatus::Completed,
            SettlementStatus::Pending,
            0,
            0,
            &[(1500, 3), (800, 2)],
        )]);
        assert_eq!(totals.product_earnings, Decimal::from(4500 + 1600));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let orders = vec![
            order(
                OrderStatus::Shipping,
                SettlementStatus::Pending,
                320,
                500,
                &[(1200, 1)],
            ),
            order(
                OrderStatus::Delivered,
                SettlementStatus::Paid,
                410,
                750,
                &[(900, 4)],
            ),
        ];

        let first = aggregate_supplier_financials(orders.clone());
        let second = aggregate_supplier_financials(orders);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_snapshot_is_zero() {
        let totals = aggregate_supplier_financials(Vec::new());
        assert_eq!(totals, SupplierFinancials::default());
    }

    #[test]
    fn test_differs_materially_threshold() {
        let base = aggregate_supplier_financials(vec![order(
            OrderStatus::Shipping,
            SettlementStatus::Pending,
            1000,
            0,
            &[],
        )]);
        let mut nudged = base;
        nudged.platform_debt += Decimal::ONE;

        assert!(!base.differs_materially(&base, Decimal::ZERO));
        assert!(!base.differs_materially(&nudged, Decimal::ONE));
        assert!(base.differs_materially(&nudged, Decimal::ZERO));
    }
}
