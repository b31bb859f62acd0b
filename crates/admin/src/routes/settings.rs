//! Pricing settings administration.

use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use tracing::instrument;

use panier_core::PricingSettings;

use crate::db::PricingSettingsRepository;
use crate::error::Result;
use crate::state::AppState;

/// Settings routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/settings/pricing",
        get(get_pricing_settings).put(put_pricing_settings),
    )
}

/// `GET /api/settings/pricing` - current pricing settings.
#[instrument(skip(state))]
async fn get_pricing_settings(State(state): State<AppState>) -> Result<Json<PricingSettings>> {
    let settings = PricingSettingsRepository::new(state.pool()).load().await?;
    Ok(Json(settings))
}

/// `PUT /api/settings/pricing` - replace the pricing settings.
///
/// The level schedule is validated during deserialization (thresholds
/// strictly increasing from 0), so an invalid schedule never reaches the
/// database. The surplus split carries no sum constraint. Future checkouts
/// pick the new settings up on their next computation; frozen orders are
/// untouched.
#[instrument(skip(state, settings))]
async fn put_pricing_settings(
    State(state): State<AppState>,
    Json(settings): Json<PricingSettings>,
) -> Result<Json<PricingSettings>> {
    PricingSettingsRepository::new(state.pool())
        .update(&settings)
        .await?;

    tracing::info!(base_margin = %settings.base_margin, "Pricing settings updated");
    Ok(Json(settings))
}
