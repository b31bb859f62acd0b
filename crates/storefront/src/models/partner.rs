//! Referral-partner model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use panier_core::{PartnerId, PartnerLevel};

/// A referral-program partner.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Partner {
    /// Unique partner ID.
    pub id: PartnerId,
    /// Display name.
    pub display_name: String,
    /// Unique promo code clients enter at checkout.
    pub promo_code: String,
    /// Lifetime validated (delivered) sales count.
    pub total_sales: i64,
    /// Current level. Progression only raises it; an admin override may
    /// set anything.
    pub level: PartnerLevel,
    /// Commission balance available for withdrawal.
    pub wallet_balance: Decimal,
    /// Lifetime commission earned.
    pub total_earnings: Decimal,
    /// Inactive partners cannot be applied at checkout.
    pub is_active: bool,
}
