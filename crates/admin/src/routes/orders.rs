//! Order administration: listings, lifecycle transitions, settlement.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use panier_core::{OrderId, OrderStatus, SupplierId};

use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::order::OrderSummary;
use crate::services::record_delivered_order;
use crate::state::AppState;

/// Order routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/suppliers/{id}/orders", get(list_supplier_orders))
        .route("/api/orders/{id}/status", post(set_order_status))
        .route("/api/suppliers/{id}/settle", post(settle_supplier))
}

/// `GET /api/suppliers/{id}/orders` - one supplier's orders with their
/// frozen financial figures.
#[instrument(skip(state))]
async fn list_supplier_orders(
    State(state): State<AppState>,
    Path(supplier_id): Path<SupplierId>,
) -> Result<Json<Vec<OrderSummary>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_supplier(supplier_id)
        .await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
struct StatusChange {
    status: OrderStatus,
}

/// `POST /api/orders/{id}/status` - move an order through its lifecycle.
///
/// A transition into `Delivered` validates the referred sale: the partner is
/// credited and may climb a level. Every transition wakes the settlement
/// feed for the order's supplier.
#[instrument(skip(state, change))]
async fn set_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
    Json(change): Json<StatusChange>,
) -> Result<Json<OrderSummary>> {
    let order = OrderRepository::new(state.pool())
        .transition(order_id, change.status)
        .await?;

    if change.status == OrderStatus::Delivered {
        record_delivered_order(state.pool(), &order).await?;
    }
    state.feed().notify_orders_changed(order.supplier_id);

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        "Order status updated"
    );
    Ok(Json(order))
}

#[derive(Debug, Serialize)]
struct SettleResponse {
    settled: u64,
}

/// `POST /api/suppliers/{id}/settle` - mark the supplier's counted, unpaid
/// orders as paid, removing them from future debt aggregation.
#[instrument(skip(state))]
async fn settle_supplier(
    State(state): State<AppState>,
    Path(supplier_id): Path<SupplierId>,
) -> Result<Json<SettleResponse>> {
    let settled = OrderRepository::new(state.pool())
        .settle_supplier(supplier_id)
        .await?;
    state.feed().notify_orders_changed(supplier_id);

    tracing::info!(%supplier_id, settled, "Supplier settled");
    Ok(Json(SettleResponse { settled }))
}
