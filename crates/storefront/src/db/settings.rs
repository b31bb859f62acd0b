//! Pricing settings repository.
//!
//! The settings live in a single-row table and are administrator-editable.
//! They are re-read from the database for every computation, so an edit
//! takes effect on the next checkout with no cache invalidation step.

use rust_decimal::Decimal;
use sqlx::PgPool;

use panier_core::{
    LevelSchedule, PartnerLevel, PartnerLevelRule, PricingSettings, SurplusSplit,
};

use super::RepositoryError;

/// Flat database row for the single-row `pricing_settings` table.
#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    base_margin: Decimal,
    platform_share: Decimal,
    partner_share: Decimal,
    client_share: Decimal,
    standard_min_sales: i64,
    standard_commission: Decimal,
    standard_discount: Decimal,
    actif_min_sales: i64,
    actif_commission: Decimal,
    actif_discount: Decimal,
    premium_min_sales: i64,
    premium_commission: Decimal,
    premium_discount: Decimal,
}

impl SettingsRow {
    fn into_settings(self) -> Result<PricingSettings, RepositoryError> {
        let rule = |level, min_sales, base_commission, base_discount| PartnerLevelRule {
            level,
            min_sales,
            base_commission,
            base_discount,
        };
        let levels = LevelSchedule::new([
            rule(
                PartnerLevel::Standard,
                self.standard_min_sales,
                self.standard_commission,
                self.standard_discount,
            ),
            rule(
                PartnerLevel::Actif,
                self.actif_min_sales,
                self.actif_commission,
                self.actif_discount,
            ),
            rule(
                PartnerLevel::Premium,
                self.premium_min_sales,
                self.premium_commission,
                self.premium_discount,
            ),
        ])
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid level schedule: {e}")))?;

        Ok(PricingSettings {
            base_margin: self.base_margin,
            split: SurplusSplit {
                platform: self.platform_share,
                partner: self.partner_share,
                client: self.client_share,
            },
            levels,
        })
    }
}

const SELECT_SETTINGS: &str = r"
    SELECT base_margin, platform_share, partner_share, client_share,
           standard_min_sales, standard_commission, standard_discount,
           actif_min_sales, actif_commission, actif_discount,
           premium_min_sales, premium_commission, premium_discount
    FROM pricing_settings
    WHERE id = 1
";

/// Repository for the marketplace pricing settings.
pub struct PricingSettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PricingSettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load the current pricing settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the settings row is missing
    /// (migrations seed it), `DataCorruption` if the stored schedule is
    /// invalid, or `Database` on query failure.
    pub async fn load(&self) -> Result<PricingSettings, RepositoryError> {
        let row = sqlx::query_as::<_, SettingsRow>(SELECT_SETTINGS)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound("pricing settings row".to_string()))?;

        row.into_settings()
    }
}
