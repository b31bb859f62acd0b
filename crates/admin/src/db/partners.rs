//! Partner repository: listings, creation, progression and overrides.

use rust_decimal::Decimal;
use sqlx::PgPool;

use panier_core::{PartnerId, PartnerLevel};

use super::RepositoryError;
use crate::models::partner::Partner;

const PARTNER_COLUMNS: &str = "id, display_name, promo_code, total_sales, level, \
     wallet_balance, total_earnings, is_active";

/// Repository for partner administration.
pub struct PartnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PartnerRepository<'a> {
    /// Create a new partner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all partners, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Partner>, RepositoryError> {
        let query = format!("SELECT {PARTNER_COLUMNS} FROM partners ORDER BY id DESC");
        let partners = sqlx::query_as::<_, Partner>(&query)
            .fetch_all(self.pool)
            .await?;
        Ok(partners)
    }

    /// Fetch one partner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: PartnerId) -> Result<Option<Partner>, RepositoryError> {
        let query = format!("SELECT {PARTNER_COLUMNS} FROM partners WHERE id = $1");
        let partner = sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(partner)
    }

    /// Create a partner with the given (already uppercased) promo code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the promo code is taken,
    /// `Database` on other failures.
    pub async fn create(
        &self,
        display_name: &str,
        promo_code: &str,
    ) -> Result<Partner, RepositoryError> {
        let query = format!(
            "INSERT INTO partners (display_name, promo_code) VALUES ($1, $2) \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(display_name)
            .bind(promo_code)
            .fetch_one(self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepositoryError::Conflict(format!("promo code {promo_code} already exists"))
                }
                _ => RepositoryError::Database(e),
            })
    }

    /// Credit a delivered sale: bump the sales count and add the frozen
    /// commission to the wallet and lifetime earnings. Returns the updated
    /// partner; the caller decides whether the level moves.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the partner does not exist,
    /// `Database` on other failures.
    pub async fn credit_delivered_sale(
        &self,
        id: PartnerId,
        commission: Decimal,
    ) -> Result<Partner, RepositoryError> {
        let query = format!(
            "UPDATE partners \
             SET total_sales = total_sales + 1, \
                 wallet_balance = wallet_balance + $2, \
                 total_earnings = total_earnings + $2, \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(commission)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("partner {id}")))
    }

    /// Set a partner's level. Used both by automatic progression (which
    /// only ever raises) and by the manual admin override (which may set
    /// anything).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the partner does not exist,
    /// `Database` on other failures.
    pub async fn set_level(
        &self,
        id: PartnerId,
        level: PartnerLevel,
    ) -> Result<Partner, RepositoryError> {
        let query = format!(
            "UPDATE partners SET level = $2, updated_at = now() WHERE id = $1 \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(level)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("partner {id}")))
    }

    /// Activate or deactivate a partner.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the partner does not exist,
    /// `Database` on other failures.
    pub async fn set_active(
        &self,
        id: PartnerId,
        is_active: bool,
    ) -> Result<Partner, RepositoryError> {
        let query = format!(
            "UPDATE partners SET is_active = $2, updated_at = now() WHERE id = $1 \
             RETURNING {PARTNER_COLUMNS}"
        );
        sqlx::query_as::<_, Partner>(&query)
            .bind(id)
            .bind(is_active)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| RepositoryError::NotFound(format!("partner {id}")))
    }
}
