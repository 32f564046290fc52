//! Statistics command: one read-only snapshot of the source database.

use mercado_simulator::{SourceDbConfig, connect, fetch_stats};

/// Fetch and report current aggregate statistics.
///
/// # Errors
///
/// Returns an error if configuration loading, connection (after retries),
/// or a statistics query fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SourceDbConfig::from_env()?;
    let mut conn = connect(&config).await?;

    let snapshot = fetch_stats(&mut conn).await?;
    snapshot.report();
    Ok(())
}
