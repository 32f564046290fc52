//! Read endpoints for the CRM service.
//!
//! # Route Structure
//!
//! ```text
//! GET /            - Service manifest
//! GET /health      - Health check
//! GET /leads       - Lead list (?limit, ?status)
//! GET /campanhas   - Campaign list (?limit)
//! GET /atividades  - Activity list (?limit, ?lead_id)
//! GET /stats       - Aggregate summary
//! ```

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

use super::models::{Activity, Campaign, Lead};
use super::state::SharedState;
use crate::envelope::ListEnvelope;

/// Build the service router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/leads", get(list_leads))
        .route("/campanhas", get(list_campaigns))
        .route("/atividades", get(list_activities))
        .route("/stats", get(stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

const fn default_limit() -> usize {
    100
}

const fn default_campaign_limit() -> usize {
    50
}

#[derive(Debug, Deserialize)]
struct LeadParams {
    #[serde(default = "default_limit")]
    limit: usize,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CampaignParams {
    #[serde(default = "default_campaign_limit")]
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct ActivityParams {
    #[serde(default = "default_limit")]
    limit: usize,
    lead_id: Option<i32>,
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "CRM API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ["/leads", "/campanhas", "/atividades", "/stats", "/health"],
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": Utc::now() }))
}

async fn list_leads(
    State(state): State<SharedState>,
    Query(params): Query<LeadParams>,
) -> Json<ListEnvelope<Lead>> {
    let guard = state.read().await;
    let filtered: Vec<Lead> = guard
        .leads
        .iter()
        .filter(|l| {
            params
                .status
                .as_ref()
                .is_none_or(|s| l.status.as_str().eq_ignore_ascii_case(s))
        })
        .cloned()
        .collect();
    // Most recent leads: the tail of the list
    let skip = filtered.len().saturating_sub(params.limit);
    Json(ListEnvelope::new(filtered.into_iter().skip(skip).collect()))
}

async fn list_campaigns(
    State(state): State<SharedState>,
    Query(params): Query<CampaignParams>,
) -> Json<ListEnvelope<Campaign>> {
    let guard = state.read().await;
    let skip = guard.campanhas.len().saturating_sub(params.limit);
    let page: Vec<Campaign> = guard.campanhas.iter().skip(skip).cloned().collect();
    Json(ListEnvelope::new(page))
}

async fn list_activities(
    State(state): State<SharedState>,
    Query(params): Query<ActivityParams>,
) -> Json<ListEnvelope<Activity>> {
    let guard = state.read().await;
    let filtered: Vec<Activity> = guard
        .atividades
        .iter()
        .filter(|a| {
            params
                .lead_id
                .is_none_or(|wanted| a.lead_id.as_i32() == wanted)
        })
        .cloned()
        .collect();
    let skip = filtered.len().saturating_sub(params.limit);
    Json(ListEnvelope::new(filtered.into_iter().skip(skip).collect()))
}

async fn stats(State(state): State<SharedState>) -> Json<Value> {
    let guard = state.read().await;

    let mut leads_por_status = std::collections::BTreeMap::<&str, u32>::new();
    for lead in &guard.leads {
        *leads_por_status.entry(lead.status.as_str()).or_default() += 1;
    }

    let mut atividades_por_tipo = std::collections::BTreeMap::<&str, u32>::new();
    for activity in &guard.atividades {
        *atividades_por_tipo.entry(activity.tipo.as_str()).or_default() += 1;
    }

    let total_leads = guard.leads.len();
    let score_medio = if total_leads == 0 {
        Decimal::ZERO
    } else {
        let total_score: i64 = guard.leads.iter().map(|l| i64::from(l.score)).sum();
        (Decimal::from(total_score) / Decimal::from(total_leads as u64)).round_dp(1)
    };

    Json(json!({
        "resumo": {
            "total_leads": total_leads,
            "leads_convertidos": leads_por_status.get("Convertido").copied().unwrap_or(0),
            "taxa_conversao": guard.conversion_rate(),
            "score_medio": score_medio,
            "total_campanhas": guard.campanhas.len(),
            "total_atividades": guard.atividades.len(),
        },
        "leads_por_status": leads_por_status,
        "atividades_por_tipo": atividades_por_tipo,
        "timestamp": Utc::now(),
    }))
}
