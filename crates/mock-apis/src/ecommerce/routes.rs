//! Read endpoints for the e-commerce service.
//!
//! # Route Structure
//!
//! ```text
//! GET /          - Service manifest
//! GET /health    - Health check
//! GET /produtos  - Product list (?limit, ?categoria)
//! GET /vendas    - Most recent sales (?limit, ?data_inicio)
//! GET /clientes  - Shopper list (?limit, ?vip_only)
//! GET /stats     - Aggregate summary
//! ```

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use super::models::{Product, Sale, Shopper};
use super::state::SharedState;
use crate::envelope::ListEnvelope;

/// Build the service router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/produtos", get(list_products))
        .route("/vendas", get(list_sales))
        .route("/clientes", get(list_shoppers))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

const fn default_limit() -> usize {
    100
}

#[derive(Debug, Deserialize)]
struct ProductParams {
    #[serde(default = "default_limit")]
    limit: usize,
    categoria: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaleParams {
    #[serde(default = "default_limit")]
    limit: usize,
    /// Keep only sales from this date (inclusive) onwards.
    data_inicio: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct ShopperParams {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    vip_only: bool,
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "E-commerce API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/produtos", "/vendas", "/clientes", "/stats", "/health"],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": Utc::now() }))
}

async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ProductParams>,
) -> Json<ListEnvelope<Product>> {
    let guard = state.read().await;
    let page: Vec<Product> = guard
        .produtos
        .iter()
        .filter(|p| {
            params
                .categoria
                .as_ref()
                .is_none_or(|c| p.categoria.eq_ignore_ascii_case(c))
        })
        .take(params.limit)
        .cloned()
        .collect();
    Json(ListEnvelope::new(page))
}

async fn list_sales(
    State(state): State<SharedState>,
    Query(params): Query<SaleParams>,
) -> Json<ListEnvelope<Sale>> {
    let guard = state.read().await;
    let filtered: Vec<Sale> = guard
        .vendas
        .iter()
        .filter(|v| {
            params
                .data_inicio
                .is_none_or(|from| v.data_venda.date_naive() >= from)
        })
        .cloned()
        .collect();
    // Most recent sales: the tail of the append-only log
    let skip = filtered.len().saturating_sub(params.limit);
    Json(ListEnvelope::new(filtered.into_iter().skip(skip).collect()))
}

async fn list_shoppers(
    State(state): State<SharedState>,
    Query(params): Query<ShopperParams>,
) -> Json<ListEnvelope<Shopper>> {
    let guard = state.read().await;
    let page: Vec<Shopper> = guard
        .clientes
        .iter()
        .filter(|c| !params.vip_only || c.vip)
        .take(params.limit)
        .cloned()
        .collect();
    Json(ListEnvelope::new(page))
}

async fn stats(State(state): State<SharedState>) -> Json<Value> {
    let guard = state.read().await;

    let total_vendas = guard.vendas.len();
    let receita_total: Decimal = guard.vendas.iter().map(|v| v.valor_total.amount()).sum();
    let ticket_medio = if total_vendas == 0 {
        Decimal::ZERO
    } else {
        (receita_total / Decimal::from(total_vendas as u64)).round_dp(2)
    };

    let mut vendas_por_status = std::collections::BTreeMap::<&str, u32>::new();
    for venda in &guard.vendas {
        *vendas_por_status.entry(venda.status.as_str()).or_default() += 1;
    }

    Json(json!({
        "resumo": {
            "total_vendas": total_vendas,
            "receita_total": receita_total.round_dp(2),
            "ticket_medio": ticket_medio,
            "total_produtos": guard.produtos.len(),
            "total_clientes": guard.clientes.len(),
            "clientes_vip": guard.clientes.iter().filter(|c| c.vip).count(),
        },
        "vendas_por_status": vendas_por_status,
        "timestamp": Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::super::state::EcommerceState;
    use super::*;

    fn shared() -> SharedState {
        EcommerceState::seeded_with(StdRng::seed_from_u64(17)).into_shared()
    }

    #[tokio::test]
    async fn test_list_products_respects_limit() {
        let state = shared();
        let Json(envelope) = list_products(
            State(state),
            Query(ProductParams {
                limit: 10,
                categoria: None,
            }),
        )
        .await;
        assert_eq!(envelope.total, 10);
    }

    #[tokio::test]
    async fn test_list_products_filters_category() {
        let state = shared();
        let Json(envelope) = list_products(
            State(state),
            Query(ProductParams {
                limit: 100,
                categoria: Some("livros".to_string()),
            }),
        )
        .await;
        assert!(envelope.dados.iter().all(|p| p.categoria == "Livros"));
    }

    #[tokio::test]
    async fn test_vip_filter() {
        let state = shared();
        let Json(envelope) = list_shoppers(
            State(state),
            Query(ShopperParams {
                limit: 100,
                vip_only: true,
            }),
        )
        .await;
        assert!(envelope.dados.iter().all(|c| c.vip));
    }

    #[tokio::test]
    async fn test_sales_tail_after_churn() {
        let state = shared();
        {
            let mut guard = state.write().await;
            for _ in 0..30 {
                let _ = guard.record_sale();
            }
        }
        let Json(envelope) = list_sales(
            State(state),
            Query(SaleParams {
                limit: 5,
                data_inicio: None,
            }),
        )
        .await;
        assert_eq!(envelope.total, 5);
        // The page is the most recent tail, so ids are the highest ones
        assert!(envelope.dados.iter().all(|v| v.id.as_i32() > 25));
    }

    #[tokio::test]
    async fn test_sales_date_filter_is_inclusive() {
        let state = shared();
        {
            let mut guard = state.write().await;
            for _ in 0..10 {
                let _ = guard.record_sale();
            }
        }
        let today = chrono::Utc::now().date_naive();

        // All sales were recorded today, so today passes them all through
        let Json(envelope) = list_sales(
            State(state.clone()),
            Query(SaleParams {
                limit: 100,
                data_inicio: Some(today),
            }),
        )
        .await;
        assert_eq!(envelope.total, 10);

        // and a cutoff after the newest sale filters everything out
        let Json(envelope) = list_sales(
            State(state),
            Query(SaleParams {
                limit: 100,
                data_inicio: Some(today + chrono::Days::new(1)),
            }),
        )
        .await;
        assert_eq!(envelope.total, 0);
    }
}
