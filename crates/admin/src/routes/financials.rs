//! Financial dashboards.
//!
//! Both endpoints aggregate the live orders on request; the persisted
//! snapshots written by the settlement feed are a cache and never served
//! from here.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;
use tracing::instrument;

use panier_core::{SupplierFinancials, SupplierId, aggregate_supplier_financials};

use crate::db::{OrderRepository, SupplierRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Financial dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/suppliers/{id}/financials", get(supplier_financials))
        .route("/api/financials/overview", get(financials_overview))
}

/// One supplier's line in the overview.
#[derive(Debug, Serialize)]
struct SupplierPosition {
    supplier_id: SupplierId,
    supplier_name: String,
    financials: SupplierFinancials,
}

/// Marketplace-wide dashboard payload.
#[derive(Debug, Serialize)]
struct Overview {
    suppliers: Vec<SupplierPosition>,
    totals: SupplierFinancials,
}

/// `GET /api/suppliers/{id}/financials` - live financial position.
#[instrument(skip(state))]
async fn supplier_financials(
    State(state): State<AppState>,
    Path(supplier_id): Path<SupplierId>,
) -> Result<Json<SupplierFinancials>> {
    SupplierRepository::new(state.pool())
        .get(supplier_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("supplier {supplier_id}")))?;

    let views = OrderRepository::new(state.pool())
        .financial_views(supplier_id)
        .await?;
    Ok(Json(aggregate_supplier_financials(views)))
}

/// `GET /api/financials/overview` - every supplier's position plus
/// marketplace totals.
#[instrument(skip(state))]
async fn financials_overview(State(state): State<AppState>) -> Result<Json<Overview>> {
    let suppliers = SupplierRepository::new(state.pool()).list().await?;
    let orders = OrderRepository::new(state.pool());

    let mut positions = Vec::with_capacity(suppliers.len());
    let mut totals = SupplierFinancials::default();
    for supplier in suppliers {
        let views = orders.financial_views(supplier.id).await?;
        let financials = aggregate_supplier_financials(views);

        totals.platform_debt += financials.platform_debt;
        totals.product_earnings += financials.product_earnings;
        totals.delivery_earnings += financials.delivery_earnings;
        totals.total_earnings += financials.total_earnings;

        positions.push(SupplierPosition {
            supplier_id: supplier.id,
            supplier_name: supplier.name,
            financials,
        });
    }

    Ok(Json(Overview {
        suppliers: positions,
        totals,
    }))
}
