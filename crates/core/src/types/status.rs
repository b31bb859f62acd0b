//! Status enums for orders, settlement and partners.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// The lifecycle is linear with no cycles:
/// `Pending → Preparing → Shipping → Delivered → Completed`, and
/// `Cancelled` is reachable from any state before `Delivered`.
///
/// Only `Shipping`, `Delivered` and `Completed` count toward financial
/// aggregation (see [`Self::counts_for_finance`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Shipping,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status contributes to supplier financials.
    #[must_use]
    pub const fn counts_for_finance(self) -> bool {
        matches!(self, Self::Shipping | Self::Delivered | Self::Completed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Preparing | Self::Cancelled)
                | (Self::Preparing, Self::Shipping | Self::Cancelled)
                | (Self::Shipping, Self::Delivered | Self::Cancelled)
                | (Self::Delivered, Self::Completed)
        )
    }

    /// Whether this status has no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Stable lowercase name, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status of an order's platform debt.
///
/// `Paid` orders are excluded from debt aggregation but still contribute
/// their earnings to the supplier's totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "settlement_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    Paid,
}

impl SettlementStatus {
    /// Stable lowercase name, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of the promo sub-record frozen into an order.
///
/// `Applied` when the code is accepted at checkout; flipped to `Validated`
/// when the order is delivered and the partner is credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "promo_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PromoStatus {
    #[default]
    Applied,
    Validated,
}

impl PromoStatus {
    /// Stable lowercase name, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Validated => "validated",
        }
    }
}

impl std::fmt::Display for PromoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Partner referral-program level.
///
/// Variants are declared in ascending order so `Ord` matches the business
/// ordering: automatic progression only ever moves a partner to a
/// strictly greater level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "partner_level", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PartnerLevel {
    #[default]
    Standard,
    Actif,
    Premium,
}

impl PartnerLevel {
    /// Stable lowercase name, matching the database representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Actif => "actif",
            Self::Premium => "premium",
        }
    }
}

impl std::fmt::Display for PartnerLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
