//! Database operations for the admin.
//!
//! The admin owns every order mutation after checkout (status transitions,
//! settlement marking), partner progression and overrides, the pricing
//! settings, and the derived supplier financial snapshots.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod financials;
pub mod orders;
pub mod partners;
pub mod settings;
pub mod suppliers;

pub use financials::FinancialSnapshotRepository;
pub use orders::OrderRepository;
pub use partners::PartnerRepository;
pub use settings::PricingSettingsRepository;
pub use suppliers::SupplierRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be mapped back into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A unique constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

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
