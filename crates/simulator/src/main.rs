//! Mercado Simulator - continuous churn for the CDC source database.
//!
//! Runs an endless loop of weighted random mutations against the Postgres
//! source tables so an external CDC connector has live changes to capture.
//! Stop with Ctrl-C; the current transaction completes before shutdown.
//!
//! # Usage
//!
//! ```bash
//! # Schema must exist first
//! cargo run -p mercado-cli -- migrate
//!
//! # Then let it churn
//! cargo run -p mercado-simulator
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use mercado_simulator::{Driver, SourceDbConfig, connect};

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mercado_simulator=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run().await {
        tracing::error!("Simulator failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = SourceDbConfig::from_env()?;
    tracing::info!(?config, "Loaded source database configuration");

    let conn = match connect(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!(error = %e, "Could not reach the source database");
            tracing::error!(
                "Check that Postgres is running on {}:{} and that DB_HOST/DB_PORT/DB_NAME/DB_USER/DB_PASSWORD are correct",
                config.host,
                config.port
            );
            return Err(e.into());
        }
    };

    Driver::new(conn).run().await?;
    Ok(())
}
