//! Client order read routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use panier_core::{ClientId, OrderId};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::order::Order;
use crate::state::AppState;

/// Order read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders/{id}", get(get_order))
        .route("/api/clients/{id}/orders", get(list_client_orders))
}

/// `GET /api/orders/{id}` - one order with its lines.
#[instrument(skip(state))]
async fn get_order(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// `GET /api/clients/{id}/orders` - a client's order history, newest first.
#[instrument(skip(state))]
async fn list_client_orders(
    State(state): State<AppState>,
    Path(id): Path<ClientId>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_client(id)
        .await?;
    Ok(Json(orders))
}
