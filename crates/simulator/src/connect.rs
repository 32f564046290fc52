//! Connection establishment with bounded retry.
//!
//! The simulator holds one long-lived connection for its whole run, so there
//! is no pool here: a plain `PgConnection` with explicit transaction control.
//! Startup retries a fixed number of times with a fixed delay (no jitter, no
//! exponential backoff) and gives up with a terminal error carrying the last
//! underlying cause.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::SourceDbConfig;

/// Maximum number of connection attempts before giving up.
pub const MAX_ATTEMPTS: u32 = 5;

/// Fixed delay between connection attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Terminal connection failure.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// All attempts were exhausted; carries the last underlying cause.
    #[error("could not connect after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },
}

/// Connect to the source database, retrying up to [`MAX_ATTEMPTS`] times
/// with a fixed [`RETRY_DELAY`] between attempts.
///
/// # Errors
///
/// Returns `ConnectError::Exhausted` once every attempt has failed.
pub async fn connect(config: &SourceDbConfig) -> Result<PgConnection, ConnectError> {
    let url = config.connection_url();

    let mut attempt = 0;
    loop {
        attempt += 1;
        match PgConnection::connect(url.expose_secret()).await {
            Ok(conn) => {
                info!(
                    host = %config.host,
                    port = config.port,
                    database = %config.database,
                    attempt,
                    "Connected to source database"
                );
                return Ok(conn);
            }
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts = MAX_ATTEMPTS,
                    error = %e,
                    "Connection attempt failed"
                );
                if attempt >= MAX_ATTEMPTS {
                    return Err(ConnectError::Exhausted {
                        attempts: attempt,
                        source: e,
                    });
                }
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}
