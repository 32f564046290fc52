//! Simulated CRM API.
//!
//! Seeds campaigns and leads in memory, spawns the activity churn task, and
//! serves read endpoints on `CRM_API_PORT` (default 8001).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use mercado_mock_apis::crm::{self, CrmState};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mercado_mock_apis=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run().await {
        tracing::error!("CRM API failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port: u16 = std::env::var("CRM_API_PORT")
        .unwrap_or_else(|_| "8001".to_string())
        .parse()?;

    let state = CrmState::seeded().into_shared();
    crm::churn::spawn(state.clone());

    let app = crm::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "CRM API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
