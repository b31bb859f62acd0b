//! Partner management commands.

use rand::{Rng, distr::Alphanumeric};

use super::{CommandError, connect};

/// Create a referral partner.
///
/// The promo code is uppercased before storage; when omitted, a random
/// 8-character code is generated.
///
/// # Errors
///
/// Returns `CommandError` if the name is blank, the code is already taken,
/// or a query fails.
pub async fn create(name: &str, code: Option<&str>) -> Result<(), CommandError> {
    let display_name = name.trim();
    if display_name.is_empty() {
        return Err(CommandError::InvalidInput("name is required".to_string()));
    }

    let promo_code = match code {
        Some(code) => {
            let code = code.trim().to_uppercase();
            if code.is_empty() {
                return Err(CommandError::InvalidInput(
                    "code cannot be blank".to_string(),
                ));
            }
            code
        }
        None => rand::rng()
            .sample_iter(Alphanumeric)
            .map(char::from)
            .filter(char::is_ascii_uppercase)
            .take(8)
            .collect(),
    };

    let pool = connect().await?;

    let partner_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO partners (display_name, promo_code) VALUES ($1, $2) RETURNING id",
    )
    .bind(display_name)
    .bind(&promo_code)
    .fetch_one(&pool)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            CommandError::InvalidInput(format!("promo code {promo_code} already exists"))
        }
        _ => CommandError::Database(e),
    })?;

    tracing::info!(partner_id, promo_code, "Partner created");
    Ok(())
}
