//! Partner repository (read-only on the storefront side).

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::partner::Partner;

/// Repository for partner lookups.
pub struct PartnerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PartnerRepository<'a> {
    /// Create a new partner repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a partner by promo code.
    ///
    /// Codes are stored uppercase; the lookup is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_code(&self, promo_code: &str) -> Result<Option<Partner>, RepositoryError> {
        let partner = sqlx::query_as::<_, Partner>(
            r"
            SELECT id, display_name, promo_code, total_sales, level,
                   wallet_balance, total_earnings, is_active
            FROM partners
            WHERE promo_code = upper($1)
            ",
        )
        .bind(promo_code.trim())
        .fetch_optional(self.pool)
        .await?;

        Ok(partner)
    }
}
