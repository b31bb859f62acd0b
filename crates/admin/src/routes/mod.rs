//! Route registration for the admin API.

use axum::Router;

use crate::state::AppState;

pub mod financials;
pub mod orders;
pub mod partners;
pub mod settings;
pub mod suppliers;

/// All admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(financials::routes())
        .merge(orders::routes())
        .merge(partners::routes())
        .merge(settings::routes())
        .merge(suppliers::routes())
}
