//! Margin redistribution: turning a product margin into a client discount,
//! a partner commission and a platform gain.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::levels::LevelSchedule;

/// How a margin surplus is split between the three parties.
///
/// The three fractions are expected to sum to 1.0 but this is deliberately
/// not validated: the settings form trusts the administrator, and an odd
/// split produces odd numbers rather than an error. The platform fraction
/// is never applied directly; the platform's share is whatever remains
/// after the partner and client bonuses are subtracted from the margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurplusSplit {
    /// Platform share of the surplus (implicit, kept for the settings form).
    pub platform: Decimal,
    /// Partner share of the surplus, added to the base commission.
    pub partner: Decimal,
    /// Client share of the surplus, added to the base discount.
    pub client: Decimal,
}

impl Default for SurplusSplit {
    /// Default 50/30/20 platform/partner/client split.
    fn default() -> Self {
        Self {
            platform: Decimal::new(50, 2),
            partner: Decimal::new(30, 2),
            client: Decimal::new(20, 2),
        }
    }
}

/// Full pricing configuration: base margin, surplus split and level
/// schedule.
///
/// Administrator-editable; callers re-read it for every computation so an
/// edit takes effect on the next call with no cache invalidation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Minimum per-product margin reserved before any bonus applies.
    pub base_margin: Decimal,
    /// Split applied to the margin above `base_margin`.
    pub split: SurplusSplit,
    /// Partner level schedule.
    pub levels: LevelSchedule,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            base_margin: Decimal::from(1000),
            split: SurplusSplit::default(),
            levels: LevelSchedule::default(),
        }
    }
}

/// Normalized input to one benefit computation.
///
/// Missing numeric inputs are coerced to zero here, at the boundary, so the
/// arithmetic below never has to guard against them. A zero buying price
/// simply yields a large margin; a zero selling price yields a negative
/// one. Neither is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitInput {
    /// Public selling price, whole currency units.
    pub selling_price: Decimal,
    /// Confidential supplier buying price, whole currency units.
    pub buying_price: Decimal,
    /// Partner lifetime validated sales count.
    pub partner_total_sales: i64,
}

impl BenefitInput {
    /// Create an input, defaulting every missing field to zero.
    ///
    /// This is the single place where the forgiving missing-value behavior
    /// lives; everything downstream works with plain values.
    #[must_use]
    pub fn from_raw(
        selling_price: Option<Decimal>,
        buying_price: Option<Decimal>,
        partner_total_sales: Option<i64>,
    ) -> Self {
        Self {
            selling_price: selling_price.unwrap_or_default(),
            buying_price: buying_price.unwrap_or_default(),
            partner_total_sales: partner_total_sales.unwrap_or_default(),
        }
    }
}

/// Output of one benefit computation.
///
/// All four values are whole currency units, each rounded independently.
/// Computed at checkout time per cart line, frozen into the order record at
/// submission, never recomputed after persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBenefit {
    /// Discount granted to the client.
    pub client_discount: Decimal,
    /// Commission earned by the partner.
    pub partner_commission: Decimal,
    /// What remains for the platform out of the margin. Negative when the
    /// margin does not cover the base figures.
    pub platform_gain: Decimal,
    /// Selling price after the client discount.
    pub final_price: Decimal,
}

/// Round to a whole currency unit, midpoint away from zero.
///
/// Matches the original system's `round()` semantics. The three outputs of
/// [`compute_benefit`] are rounded independently, so the identity
/// `margin == commission + discount + gain` can drift by ±1 unit; that
/// drift is accepted behavior.
fn round_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute the client discount, partner commission and platform gain for
/// one product sold through a partner's promo code.
///
/// 1. The partner's level supplies the base commission and discount.
/// 2. Margin above `settings.base_margin` is a surplus; the partner and
///    client fractions of it are added as bonuses. The platform fraction is
///    never added anywhere - the platform's share materializes in the final
///    subtraction.
/// 3. `platform_gain = margin - commission - discount`, which goes negative
///    when the margin is negative or below the base figures. Not rejected.
#[must_use]
pub fn compute_benefit(input: &BenefitInput, settings: &PricingSettings) -> PriceBenefit {
    let rule = settings.levels.resolve(input.partner_total_sales);
    let mut commission = rule.base_commission;
    let mut discount = rule.base_discount;

    let margin = input.selling_price - input.buying_price;
    let surplus = margin - settings.base_margin;
    if surplus > Decimal::ZERO {
        commission += round_unit(surplus * settings.split.partner);
        discount += round_unit(surplus * settings.split.client);
    }

    let commission = round_unit(commission);
    let discount = round_unit(discount);
    PriceBenefit {
        client_discount: discount,
        partner_commission: commission,
        platform_gain: round_unit(margin - commission - discount),
        final_price: round_unit(input.selling_price - discount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(selling: i64, buying: i64, sales: i64) -> BenefitInput {
        BenefitInput {
            selling_price: Decimal::from(selling),
            buying_price: Decimal::from(buying),
            partner_total_sales: sales,
        }
    }

    #[test]
    fn test_no_surplus_pays_base_figures_exactly() {
        let settings = PricingSettings::default();
        // Margin 800 < base margin 1000: no bonus branch.
        let benefit = compute_benefit(&input(2000, 1200, 0), &settings);
        assert_eq!(benefit.partner_commission, Decimal::from(150));
        assert_eq!(benefit.client_discount, Decimal::from(150));
        assert_eq!(benefit.platform_gain, Decimal::from(500));
        assert_eq!(benefit.final_price, Decimal::from(1850));
    }

    #[test]
    fn test_surplus_redistribution_worked_example() {
        // selling 6000, buying 3000, base margin 1000 => surplus 2000.
        // Standard level (150/150), split partner 0.30 / client 0.20:
        // commission 150 + 600 = 750, discount 150 + 400 = 550,
        // gain 3000 - 750 - 550 = 1700, final price 6000 - 550 = 5450.
        let settings = PricingSettings::default();
        let benefit = compute_benefit(&input(6000, 3000, 0), &settings);
        assert_eq!(benefit.partner_commission, Decimal::from(750));
        assert_eq!(benefit.client_discount, Decimal::from(550));
        assert_eq!(benefit.platform_gain, Decimal::from(1700));
        assert_eq!(benefit.final_price, Decimal::from(5450));
    }

    #[test]
    fn test_higher_level_raises_base_figures() {
        let settings = PricingSettings::default();
        let standard = compute_benefit(&input(6000, 3000, 0), &settings);
        let premium = compute_benefit(&input(6000, 3000, 200), &settings);
        assert_eq!(
            premium.partner_commission - standard.partner_commission,
            Decimal::from(100)
        );
        assert_eq!(
            premium.client_discount - standard.client_discount,
            Decimal::from(100)
        );
    }

    #[test]
    fn test_margin_identity_holds_within_one_unit() {
        // Three independent roundings can drift the identity by at most one
        // unit in either direction; pin that tolerance down.
        let settings = PricingSettings::default();
        for selling in (1000..8000).step_by(37) {
            for buying in (0..selling).step_by(211) {
                let benefit = compute_benefit(&input(selling, buying, 45), &settings);
                let margin = Decimal::from(selling - buying);
                let redistributed =
                    benefit.partner_commission + benefit.client_discount + benefit.platform_gain;
                let drift = (margin - redistributed).abs();
                assert!(
                    drift <= Decimal::ONE,
                    "identity drift {drift} at selling={selling} buying={buying}"
                );
            }
        }
    }

    #[test]
    fn test_negative_margin_is_not_rejected() {
        let settings = PricingSettings::default();
        // Buying above selling: surplus negative, no bonus, gain negative.
        let benefit = compute_benefit(&input(1000, 2500, 0), &settings);
        assert_eq!(benefit.partner_commission, Decimal::from(150));
        assert_eq!(benefit.client_discount, Decimal::from(150));
        assert_eq!(benefit.platform_gain, Decimal::from(-1800));
        assert_eq!(benefit.final_price, Decimal::from(850));
    }

    #[test]
    fn test_split_not_required_to_sum_to_one() {
        // Permissive by design: an over-generous split just overdraws the
        // platform's gain, it does not error.
        let settings = PricingSettings {
            split: SurplusSplit {
                platform: Decimal::ZERO,
                partner: Decimal::new(90, 2),
                client: Decimal::new(90, 2),
            },
            ..PricingSettings::default()
        };
        let benefit = compute_benefit(&input(6000, 3000, 0), &settings);
        assert_eq!(benefit.partner_commission, Decimal::from(150 + 1800));
        assert_eq!(benefit.client_discount, Decimal::from(150 + 1800));
        assert_eq!(benefit.platform_gain, Decimal::from(3000 - 1950 - 1950));
    }

    #[test]
    fn test_missing_inputs_default_to_zero() {
        let settings = PricingSettings::default();
        let raw = BenefitInput::from_raw(None, None, None);
        assert_eq!(raw, input(0, 0, 0));

        // Degraded but non-failing output: base figures still apply.
        let benefit = compute_benefit(&raw, &settings);
        assert_eq!(benefit.partner_commission, Decimal::from(150));
        assert_eq!(benefit.final_price, Decimal::from(-150));
    }

    #[test]
    fn test_outputs_are_whole_units() {
        // A surplus of 1 with a 0.30/0.20 split forces fractional bonuses;
        // every output must still come out whole.
        let settings = PricingSettings::default();
        let benefit = compute_benefit(&input(3001, 2000, 0), &settings);
        for value in [
            benefit.client_discount,
            benefit.partner_commission,
            benefit.platform_gain,
            benefit.final_price,
        ] {
            assert_eq!(value, round_unit(value));
            assert_eq!(value.fract(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_rounding_is_midpoint_away_from_zero() {
        assert_eq!(round_unit(Decimal::new(5, 1)), Decimal::ONE); // 0.5 -> 1
        assert_eq!(round_unit(Decimal::new(25, 1)), Decimal::from(3)); // 2.5 -> 3
        assert_eq!(round_unit(Decimal::new(-5, 1)), Decimal::from(-1)); // -0.5 -> -1
    }
}
