//! Seed command: land one change batch in the source database.

use mercado_simulator::{Mutator, SeedPlan, SourceDbConfig, connect, seed};
use tracing::info;

/// Run one seed batch with the given plan.
///
/// # Errors
///
/// Returns an error if configuration loading, connection (after retries),
/// or a seed statement fails.
pub async fn run(orders: u32, updates: u32, deletes: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = SourceDbConfig::from_env()?;
    let mut conn = connect(&config).await?;

    let plan = SeedPlan {
        orders,
        updates,
        deletes,
    };
    let mut mutator = Mutator::new();
    let report = seed(&mut conn, &mut mutator, &plan).await?;

    info!(
        customers_inserted = report.customers_inserted,
        orders_inserted = report.orders_inserted,
        customers_updated = report.customers_updated,
        customers_deleted = report.customers_deleted,
        "Seed finished"
    );
    Ok(())
}
