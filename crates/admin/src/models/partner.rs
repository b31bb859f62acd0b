//! Partner models for the back-office.

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
    /// Current level.
    pub level: PartnerLevel,
    /// Commission balance available for withdrawal.
    pub wallet_balance: Decimal,
    /// Lifetime commission earned.
    pub total_earnings: Decimal,
    /// Inactive partners cannot be applied at checkout.
    pub is_active: bool,
}

/// Input for creating a partner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePartnerInput {
    /// Display name.
    pub display_name: String,
    /// Promo code; generated when not supplied.
    pub promo_code: Option<String>,
}
