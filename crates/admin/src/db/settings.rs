//! Pricing settings repository (read and administer).
//!
//! Single-row table; the storefront re-reads it per checkout, so an update
//! here takes effect on the next computation with no further step.

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

    /// Overwrite the pricing settings.
    ///
    /// The schedule shape was already validated when `settings` was built
    /// (`LevelSchedule` cannot exist in an invalid shape); the surplus
    /// split is deliberately written without a sum check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, settings: &PricingSettings) -> Result<(), RepositoryError> {
        let standard = settings.levels.rule_for(PartnerLevel::Standard);
        let actif = settings.levels.rule_for(PartnerLevel::Actif);
        let premium = settings.levels.rule_for(PartnerLevel::Premium);

        sqlx::query(
            r"
            UPDATE pricing_settings
            SET base_margin = $1,
                platform_share = $2, partner_share = $3, client_share = $4,
                standard_min_sales = $5, standard_commission = $6, standard_discount = $7,
                actif_min_sales = $8, actif_commission = $9, actif_discount = $10,
                premium_min_sales = $11, premium_commission = $12, premium_discount = $13,
                updated_at = now()
            WHERE id = 1
            ",
        )
        .bind(settings.base_margin)
        .bind(settings.split.platform)
        .bind(settings.split.partner)
        .bind(settings.split.client)
        .bind(standard.min_sales)
        .bind(standard.base_commission)
        .bind(standard.base_discount)
        .bind(actif.min_sales)
        .bind(actif.base_commission)
        .bind(actif.base_discount)
        .bind(premium.min_sales)
        .bind(premium.base_commission)
        .bind(premium.base_discount)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
