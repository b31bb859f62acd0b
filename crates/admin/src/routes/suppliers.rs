//! Supplier listing.

use axum::{Json, Router, extract::State, routing::get};
use tracing::instrument;

use crate::db::SupplierRepository;
use crate::error::Result;
use crate::models::supplier::Supplier;
use crate::state::AppState;

/// Supplier routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suppliers", get(list_suppliers))
}

/// `GET /api/suppliers` - all suppliers.
#[instrument(skip(state))]
async fn list_suppliers(State(state): State<AppState>) -> Result<Json<Vec<Supplier>>> {
    let suppliers = SupplierRepository::new(state.pool()).list().await?;
    Ok(Json(suppliers))
}
