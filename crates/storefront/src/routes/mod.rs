//! Route registration for the storefront API.

use axum::Router;

use crate::state::AppState;

pub mod catalog;
pub mod checkout;
pub mod orders;

/// All storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::routes())
        .merge(checkout::routes())
        .merge(orders::routes())
}
