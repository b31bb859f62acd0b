//! Partner administration: listing, creation, level override, activation.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use tracing::instrument;

use panier_core::{PartnerId, PartnerLevel};

use crate::db::PartnerRepository;
use crate::error::{AppError, Result};
use crate::models::partner::{CreatePartnerInput, Partner};
use crate::state::AppState;

/// Partner routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/partners", get(list_partners).post(create_partner))
        .route("/api/partners/{id}/level", post(set_partner_level))
        .route("/api/partners/{id}/active", post(set_partner_active))
}

/// `GET /api/partners` - all partners, most recent first.
#[instrument(skip(state))]
async fn list_partners(State(state): State<AppState>) -> Result<Json<Vec<Partner>>> {
    let partners = PartnerRepository::new(state.pool()).list().await?;
    Ok(Json(partners))
}

/// Random 8-character uppercase promo code.
fn generate_promo_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .map(char::from)
        .filter(char::is_ascii_uppercase)
        .take(8)
        .collect()
}

/// `POST /api/partners` - create a partner.
///
/// Promo codes are stored uppercase; one is generated when not supplied.
#[instrument(skip(state, input))]
async fn create_partner(
    State(state): State<AppState>,
    Json(input): Json<CreatePartnerInput>,
) -> Result<(StatusCode, Json<Partner>)> {
    let display_name = input.display_name.trim();
    if display_name.is_empty() {
        return Err(AppError::BadRequest("display_name is required".to_string()));
    }

    let promo_code = match input.promo_code {
        Some(code) => {
            let code = code.trim().to_uppercase();
            if code.is_empty() {
                return Err(AppError::BadRequest("promo_code cannot be blank".to_string()));
            }
            code
        }
        None => generate_promo_code(),
    };

    let partner = PartnerRepository::new(state.pool())
        .create(display_name, &promo_code)
        .await?;

    tracing::info!(partner_id = %partner.id, promo_code = %partner.promo_code, "Partner created");
    Ok((StatusCode::CREATED, Json(partner)))
}

#[derive(Debug, Deserialize)]
struct LevelOverride {
    level: PartnerLevel,
}

/// `POST /api/partners/{id}/level` - manual level override.
///
/// Unlike automatic progression this may set any level, including a lower
/// one. Overrides do not touch the sales count, so the next validated sale
/// re-applies the upward-only rule from the overridden level.
#[instrument(skip(state, input))]
async fn set_partner_level(
    State(state): State<AppState>,
    Path(partner_id): Path<PartnerId>,
    Json(input): Json<LevelOverride>,
) -> Result<Json<Partner>> {
    let partner = PartnerRepository::new(state.pool())
        .set_level(partner_id, input.level)
        .await?;

    tracing::info!(%partner_id, level = %partner.level, "Partner level overridden");
    Ok(Json(partner))
}

#[derive(Debug, Deserialize)]
struct ActiveChange {
    is_active: bool,
}

/// `POST /api/partners/{id}/active` - activate or deactivate a partner.
///
/// Deactivation blocks the code at future checkouts; existing orders keep
/// their frozen figures.
#[instrument(skip(state, input))]
async fn set_partner_active(
    State(state): State<AppState>,
    Path(partner_id): Path<PartnerId>,
    Json(input): Json<ActiveChange>,
) -> Result<Json<Partner>> {
    let partner = PartnerRepository::new(state.pool())
        .set_active(partner_id, input.is_active)
        .await?;

    tracing::info!(%partner_id, is_active = partner.is_active, "Partner activity changed");
    Ok(Json(partner))
}
