//! Simulated e-commerce API.
//!
//! Seeds products and shoppers in memory, spawns the sales churn task, and
//! serves read endpoints on `ECOMMERCE_API_PORT` (default 8000).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use mercado_mock_apis::ecommerce::{self, EcommerceState};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mercado_mock_apis=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if let Err(e) = run().await {
        tracing::error!("E-commerce API failed: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port: u16 = std::env::var("ECOMMERCE_API_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()?;

    let state = EcommerceState::seeded().into_shared();
    ecommerce::churn::spawn(state.clone());

    let app = ecommerce::router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "E-commerce API listening");

    axum::serve(listener, app).await?;
    Ok(())
}
