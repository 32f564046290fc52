//! Source-database migration command.
//!
//! Migrations live in `crates/simulator/migrations/` and are embedded at
//! compile time. They are only ever run from here - never automatically at
//! binary startup.

use mercado_simulator::{SourceDbConfig, connect};
use tracing::info;

/// Run all pending migrations against the source database.
///
/// # Errors
///
/// Returns an error if configuration loading, connection (after retries),
/// or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SourceDbConfig::from_env()?;
    info!(?config, "Running source-database migrations");

    let mut conn = connect(&config).await?;
    sqlx::migrate!("../simulator/migrations")
        .run(&mut conn)
        .await?;

    info!("Migrations complete");
    Ok(())
}
