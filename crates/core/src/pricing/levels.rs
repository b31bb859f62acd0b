//! Partner level schedule and resolution.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::PartnerLevel;

/// One row of the level schedule: the threshold at which a partner reaches
/// a level, and the base commission/discount that level grants per sale.
///
/// All money amounts are whole currency units (CFA francs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerLevelRule {
    /// The level this rule describes.
    pub level: PartnerLevel,
    /// Minimum lifetime validated sales count to reach this level.
    pub min_sales: i64,
    /// Base partner commission per sale at this level.
    pub base_commission: Decimal,
    /// Base client discount per sale at this level.
    pub base_discount: Decimal,
}

/// Validation errors for a [`LevelSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The lowest level must start at zero sales so every sales count maps
    /// to some level.
    #[error("first level threshold must be 0 (got {0})")]
    FirstThresholdNotZero(i64),

    /// Thresholds must be strictly increasing.
    #[error("level thresholds must be strictly increasing ({0} then {1})")]
    ThresholdsNotIncreasing(i64, i64),

    /// Rules must be given in ascending level order (Standard, Actif, Premium).
    #[error("level rules out of order: {0} listed after {1}")]
    LevelsOutOfOrder(PartnerLevel, PartnerLevel),
}

/// The three-rule partner level schedule, ordered by ascending threshold.
///
/// Invariant (checked at construction): rules are Standard, Actif, Premium
/// in that order, thresholds strictly increasing starting at 0, so the
/// schedule covers every sales count with no gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PartnerLevelRule>", into = "Vec<PartnerLevelRule>")]
pub struct LevelSchedule {
    rules: [PartnerLevelRule; 3],
}

impl LevelSchedule {
    /// Build a schedule from three rules.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the rules are not in ascending level
    /// order, the first threshold is not 0, or thresholds are not strictly
    /// increasing.
    pub fn new(rules: [PartnerLevelRule; 3]) -> Result<Self, ScheduleError> {
        let [first, second, third] = &rules;

        if first.min_sales != 0 {
            return Err(ScheduleError::FirstThresholdNotZero(first.min_sales));
        }
        for (a, b) in [(first, second), (second, third)] {
            if a.level >= b.level {
                return Err(ScheduleError::LevelsOutOfOrder(a.level, b.level));
            }
            if a.min_sales >= b.min_sales {
                return Err(ScheduleError::ThresholdsNotIncreasing(
                    a.min_sales,
                    b.min_sales,
                ));
            }
        }

        Ok(Self { rules })
    }

    /// Resolve the level rule for a partner's lifetime sales count.
    ///
    /// Selects the highest-threshold rule whose `min_sales <= total_sales`.
    /// A negative count is treated as 0, so the function is total: every
    /// input resolves to some rule and no error is ever raised.
    #[must_use]
    pub fn resolve(&self, total_sales: i64) -> &PartnerLevelRule {
        let sales = total_sales.max(0);
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.min_sales <= sales)
            .unwrap_or(&self.rules[0])
    }

    /// Look up the rule for a specific level.
    #[must_use]
    pub fn rule_for(&self, level: PartnerLevel) -> &PartnerLevelRule {
        self.rules
            .iter()
            .find(|rule| rule.level == level)
            .unwrap_or(&self.rules[0])
    }

    /// All three rules, ascending by threshold.
    #[must_use]
    pub fn rules(&self) -> &[PartnerLevelRule] {
        &self.rules
    }
}

impl Default for LevelSchedule {
    /// Default schedule: Standard from 0 sales, Actif from 30, Premium from
    /// 150, with base commission/discount of 150, 200 and 250 francs.
    fn default() -> Self {
        let rule = |level, min_sales, figure: i64| PartnerLevelRule {
            level,
            min_sales,
            base_commission: Decimal::from(figure),
            base_discount: Decimal::from(figure),
        };
        Self {
            rules: [
                rule(PartnerLevel::Standard, 0, 150),
                rule(PartnerLevel::Actif, 30, 200),
                rule(PartnerLevel::Premium, 150, 250),
            ],
        }
    }
}

impl TryFrom<Vec<PartnerLevelRule>> for LevelSchedule {
    type Error = String;

    fn try_from(rules: Vec<PartnerLevelRule>) -> Result<Self, Self::Error> {
        let rules: [PartnerLevelRule; 3] = rules
            .try_into()
            .map_err(|v: Vec<_>| format!("expected exactly 3 level rules, got {}", v.len()))?;
        Self::new(rules).map_err(|e| e.to_string())
    }
}

impl From<LevelSchedule> for Vec<PartnerLevelRule> {
    fn from(schedule: LevelSchedule) -> Self {
        schedule.rules.to_vec()
    }
}
