//! Database migration command.
//!
//! Neither server binary runs migrations on startup; this command is the
//! only migration path, in development and in deployment.

use super::{CommandError, connect};

/// Run all pending migrations embedded from `crates/cli/migrations/`.
///
/// # Errors
///
/// Returns `CommandError` if the connection or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
