//! Database operations for the storefront.
//!
//! The storefront and the admin share one `PostgreSQL` database (`panier`);
//! this binary only creates orders and reads catalog, partner and pricing
//! data. Everything after order creation belongs to the admin binary.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/cli/migrations/` and run via:
//! ```bash
//! cargo run -p panier-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod orders;
pub mod partners;
pub mod products;
pub mod settings;

pub use orders::OrderRepository;
pub use partners::PartnerRepository;
pub use products::ProductRepository;
pub use settings::PricingSettingsRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be mapped back into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The row being referenced does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
