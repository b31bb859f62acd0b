//! Catalog read routes.
//!
//! The confidential supplier cost never leaves the server: the catalog
//! response carries only public fields.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use panier_core::{ProductId, SupplierId};

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::product::Product;
use crate::state::AppState;

/// Public view of a product (no supplier cost).
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub supplier_id: SupplierId,
    pub name: String,
    pub selling_price: Decimal,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            supplier_id: product.supplier_id,
            name: product.name,
            selling_price: product.selling_price,
        }
    }
}

/// Catalog routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/suppliers/{id}/products", get(list_supplier_products))
}

/// `GET /api/suppliers/{id}/products` - a supplier's listed products.
#[instrument(skip(state))]
async fn list_supplier_products(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> Result<Json<Vec<ProductView>>> {
    let products = ProductRepository::new(state.pool())
        .list_for_supplier(id)
        .await?;
    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}
