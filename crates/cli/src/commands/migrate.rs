//! Database migration command.
//!
//! Migrations live in `crates/api/migrations/` and are embedded into the
//! binary at compile time, so the CLI can migrate any reachable database
//! without a source checkout.

use tracing::info;

/// Run database migrations.
///
/// # Errors
///
/// Returns an error if `GIFTWISE_DATABASE_URL` is unset or a migration
/// fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running database migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    info!("Migrations complete");
    Ok(())
}
