//! Checkout route handler.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use tracing::instrument;

use crate::error::Result;
use crate::models::order::{CheckoutRequest, Order};
use crate::services::CheckoutService;
use crate::state::AppState;

/// Checkout routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/checkout", post(place_order))
}

/// `POST /api/checkout` - price the cart and create the order.
#[instrument(skip(state, request))]
async fn place_order(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = CheckoutService::new(state.pool())
        .place_order(request)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}
