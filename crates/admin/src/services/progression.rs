//! Partner progression on delivered orders.
//!
//! Delivery is the validation point of a referred sale: the partner is paid
//! the commission frozen at checkout, their lifetime sales count moves, and
//! the current level schedule decides whether they climb a level. Automatic
//! progression only ever raises a level; demotion is a manual admin action.

use tracing::instrument;

use panier_core::{LevelSchedule, PartnerLevel};
use sqlx::PgPool;

use crate::db::{OrderRepository, PartnerRepository, PricingSettingsRepository, RepositoryError};
use crate::models::order::OrderSummary;

/// Level the partner should hold after a validated sale, if it changed.
///
/// Resolves the schedule at the new sales count and returns `Some` only when
/// the resolved level is strictly above the current one. A schedule edit that
/// now resolves below the held level returns `None`; the held level stays.
#[must_use]
pub fn earned_promotion(
    schedule: &LevelSchedule,
    total_sales: i64,
    current: PartnerLevel,
) -> Option<PartnerLevel> {
    let resolved = schedule.resolve(total_sales).level;
    (resolved > current).then_some(resolved)
}

/// Apply the delivery side effects for one order, if it carries a promo.
///
/// Marks the promo sub-record validated, credits the frozen commission,
/// bumps the sales count, then promotes the partner when the fresh schedule
/// says the new count earns a higher level. Orders without a promo are a
/// no-op.
///
/// # Errors
///
/// Returns `RepositoryError` if the partner is missing or a query fails.
#[instrument(skip_all, fields(order_id = %order.id))]
pub async fn record_delivered_order(
    pool: &PgPool,
    order: &OrderSummary,
) -> Result<(), RepositoryError> {
    let (Some(partner_id), Some(commission)) = (order.partner_id, order.partner_commission) else {
        return Ok(());
    };

    OrderRepository::new(pool).validate_promo(order.id).await?;

    let partners = PartnerRepository::new(pool);
    let partner = partners.credit_delivered_sale(partner_id, commission).await?;

    let settings = PricingSettingsRepository::new(pool).load().await?;
    if let Some(level) = earned_promotion(&settings.levels, partner.total_sales, partner.level) {
        partners.set_level(partner_id, level).await?;
        tracing::info!(
            partner_id = %partner_id,
            total_sales = partner.total_sales,
            %level,
            "Partner promoted"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promotion_at_threshold() {
        let schedule = LevelSchedule::default();
        // Default Actif threshold is 30 validated sales.
        assert_eq!(
            earned_promotion(&schedule, 30, PartnerLevel::Standard),
            Some(PartnerLevel::Actif)
        );
        assert_eq!(earned_promotion(&schedule, 29, PartnerLevel::Standard), None);
    }

    #[test]
    fn test_no_repromotion_at_held_level() {
        let schedule = LevelSchedule::default();
        assert_eq!(earned_promotion(&schedule, 80, PartnerLevel::Actif), None);
    }

    #[test]
    fn test_override_above_schedule_is_kept() {
        // A partner manually raised to Premium stays there even though the
        // schedule resolves their count to Standard.
        let schedule = LevelSchedule::default();
        assert_eq!(earned_promotion(&schedule, 5, PartnerLevel::Premium), None);
    }

    #[test]
    fn test_can_skip_a_level() {
        let schedule = LevelSchedule::default();
        assert_eq!(
            earned_promotion(&schedule, 150, PartnerLevel::Standard),
            Some(PartnerLevel::Premium)
        );
    }
}
