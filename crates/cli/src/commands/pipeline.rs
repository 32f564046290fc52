//! The batch pipeline: seed, trigger the connector sync, run transforms.
//!
//! This is the demo's workflow graph as a sequential run. Capture and
//! transformation stay external: the sync step only POSTs the connector's
//! trigger endpoint, and the transform and test steps only spawn whatever
//! commands `TRANSFORM_COMMAND` and `TRANSFORM_TEST_COMMAND` name (typically
//! `dbt run` and `dbt test` wrappers). A failed step aborts the run.
//!
//! # Environment Variables
//!
//! - `CONNECTOR_API_URL` - Connector API base URL (default: `http://localhost:8080/api/v1`)
//! - `CONNECTOR_CONNECTION_ID` - Connection to sync (required for the sync step)
//! - `CONNECTOR_SYNC_TIMEOUT` - Sync trigger timeout in seconds (default: 3600)
//! - `TRANSFORM_COMMAND` - Optional shell command for the transform step
//! - `TRANSFORM_TEST_COMMAND` - Optional shell command for the test step

use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use mercado_simulator::{MutationError, Mutator, SeedPlan, SourceDbConfig, connect, seed};

/// Errors from a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Seed step failed: {0}")]
    Seed(#[from] MutationError),

    #[error("Connector sync request failed: {0}")]
    SyncRequest(#[from] reqwest::Error),

    #[error("Connector sync was rejected with status {0}")]
    SyncRejected(reqwest::StatusCode),

    #[error("Connector sync job reported status {0:?}")]
    SyncJobNotSucceeded(String),

    #[error("Transform command could not be spawned: {0}")]
    TransformSpawn(#[from] std::io::Error),

    #[error("Transform command exited with {0}")]
    TransformFailed(std::process::ExitStatus),
}

/// Run the pipeline steps in order.
///
/// # Errors
///
/// Returns the first step failure; later steps do not run.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    // Step 1: populate the source database
    info!("Pipeline step 1/4: seed source database");
    let config = SourceDbConfig::from_env()?;
    let mut conn = connect(&config).await?;
    let mut mutator = Mutator::new();
    seed(&mut conn, &mut mutator, &SeedPlan::default())
        .await
        .map_err(PipelineError::Seed)?;

    // Step 2: trigger the CDC connector sync
    info!("Pipeline step 2/4: trigger connector sync");
    trigger_sync().await?;

    // Steps 3 and 4: run downstream transformations and their tests, when
    // configured; the test step only runs once the transform step passed
    info!("Pipeline step 3/4: run transformations");
    run_configured_command("TRANSFORM_COMMAND").await?;

    info!("Pipeline step 4/4: run transformation tests");
    run_configured_command("TRANSFORM_TEST_COMMAND").await?;

    info!("Pipeline run complete");
    Ok(())
}

/// POST the connector's sync endpoint and check the response status.
async fn trigger_sync() -> Result<(), PipelineError> {
    let base_url = std::env::var("CONNECTOR_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string());
    let connection_id = std::env::var("CONNECTOR_CONNECTION_ID")
        .map_err(|_| PipelineError::MissingEnvVar("CONNECTOR_CONNECTION_ID"))?;
    let timeout_secs = std::env::var("CONNECTOR_SYNC_TIMEOUT")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(3600);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?;

    let response = client
        .post(format!("{base_url}/connections/sync"))
        .json(&json!({ "connectionId": connection_id }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(PipelineError::SyncRejected(status));
    }

    let body: serde_json::Value = response.json().await.unwrap_or_default();
    check_sync_job(&body)?;
    info!(connection_id, %status, body = %body, "Connector sync triggered");
    Ok(())
}

/// Verify the job status reported in the sync response body.
///
/// The connector can accept the request (HTTP 2xx) and still report a failed
/// job at `jobInfo.job.status`, so only `"succeeded"` passes.
fn check_sync_job(body: &serde_json::Value) -> Result<(), PipelineError> {
    let job_status = body["jobInfo"]["job"]["status"].as_str().unwrap_or("missing");
    if job_status == "succeeded" {
        Ok(())
    } else {
        Err(PipelineError::SyncJobNotSucceeded(job_status.to_string()))
    }
}

/// Spawn the shell command the environment variable `var` names, if set.
async fn run_configured_command(var: &str) -> Result<(), PipelineError> {
    let Ok(command) = std::env::var(var) else {
        warn!("{var} not set, skipping");
        return Ok(());
    };

    info!(var, command, "Running command");
    let status = run_shell(&command).await?;
    if !status.success() {
        return Err(PipelineError::TransformFailed(status));
    }
    Ok(())
}

async fn run_shell(command: &str) -> Result<std::process::ExitStatus, std::io::Error> {
    tokio::process::Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .await
}
