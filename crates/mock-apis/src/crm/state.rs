//! In-memory state for the CRM service.

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use mercado_core::{ActivityId, CampaignId, LeadId, Price};

use super::models::{
    ACTIVITY_RESULTS, ACTIVITY_TYPES, Activity, CAMPAIGN_TYPES, Campaign, INTEREST_LEVELS,
    LEAD_SOURCES, Lead, LeadStatus,
};
use crate::fake;

/// Shared handle used by handlers and the churn task.
pub type SharedState = Arc<RwLock<CrmState>>;

/// Everything the service knows, behind one lock.
pub struct CrmState {
    pub campanhas: Vec<Campaign>,
    pub leads: Vec<Lead>,
    pub atividades: Vec<Activity>,
    next_campaign_id: i32,
    next_lead_id: i32,
    next_activity_id: i32,
    rng: StdRng,
}

/// Campaigns generated at startup.
const INITIAL_CAMPAIGNS: usize = 10;

/// Leads generated at startup.
const INITIAL_LEADS: usize = 200;

impl CrmState {
    /// Build a freshly seeded state with an OS-seeded RNG.
    #[must_use]
    pub fn seeded() -> Self {
        Self::seeded_with(StdRng::from_os_rng())
    }

    /// Build a freshly seeded state with a caller-provided RNG
    /// (deterministic in tests).
    #[must_use]
    pub fn seeded_with(rng: StdRng) -> Self {
        let mut state = Self {
            campanhas: Vec::with_capacity(INITIAL_CAMPAIGNS),
            leads: Vec::with_capacity(INITIAL_LEADS),
            atividades: Vec::new(),
            next_campaign_id: 1,
            next_lead_id: 1,
            next_activity_id: 1,
            rng,
        };

        for _ in 0..INITIAL_CAMPAIGNS {
            state.add_campaign();
        }
        for _ in 0..INITIAL_LEADS {
            state.add_lead();
        }
        state
    }

    /// Wrap into the shared handle.
    #[must_use]
    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    fn add_campaign(&mut self) {
        let id = CampaignId::new(self.next_campaign_id);
        self.next_campaign_id += 1;

        let today = Utc::now().date_naive();
        let started_days_ago = self.rng.random_range(0..=180);
        let runs_for_days = self.rng.random_range(30..=120);
        let statuses = ["Ativa", "Pausada", "Finalizada"];

        self.campanhas.push(Campaign {
            id,
            nome: format!("Campanha {}", fake::product_name(&mut self.rng)),
            tipo: CAMPAIGN_TYPES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(CAMPAIGN_TYPES[0])
                .to_string(),
            orcamento: Price::new(fake::amount(&mut self.rng, 100_000, 5_000_000)),
            data_inicio: today - Duration::days(started_days_ago),
            data_fim: today - Duration::days(started_days_ago) + Duration::days(runs_for_days),
            status: statuses
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("Ativa")
                .to_string(),
            meta_leads: self.rng.random_range(50..=500),
            leads_gerados: 0,
            ctr: fake::amount(&mut self.rng, 50, 500), // 0.50% - 5.00%
            cpc: Price::new(fake::amount(&mut self.rng, 50, 1_500)),
        });
    }

    fn add_lead(&mut self) {
        let id = LeadId::new(self.next_lead_id);
        self.next_lead_id += 1;

        let nome = fake::full_name(&mut self.rng);
        let email = fake::email_for(&mut self.rng, &nome);
        let created_days_ago = self.rng.random_range(0..=365);
        let contacted_days_ago = self.rng.random_range(0..=30);

        let campanha_id = self
            .campanhas
            .choose(&mut self.rng)
            .map(|campaign| campaign.id);
        if let Some(campaign_id) = campanha_id
            && let Some(campaign) = self.campanhas.iter_mut().find(|c| c.id == campaign_id)
        {
            campaign.leads_gerados += 1;
        }

        let statuses = [
            LeadStatus::Novo,
            LeadStatus::Contactado,
            LeadStatus::Qualificado,
            LeadStatus::Convertido,
            LeadStatus::Perdido,
        ];

        self.leads.push(Lead {
            id,
            nome,
            email,
            telefone: fake::phone(&mut self.rng),
            empresa: fake::company(&mut self.rng),
            cargo: fake::job_title(&mut self.rng),
            fonte: LEAD_SOURCES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(LEAD_SOURCES[0])
                .to_string(),
            campanha_id,
            score: self.rng.random_range(1..=100),
            status: statuses
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(LeadStatus::Novo),
            data_criacao: Utc::now() - Duration::days(created_days_ago),
            ultimo_contato: Utc::now() - Duration::days(contacted_days_ago),
            interesse: INTEREST_LEVELS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(INTEREST_LEVELS[0])
                .to_string(),
            orcamento_estimado: Price::new(fake::amount(&mut self.rng, 100_000, 10_000_000)),
        });
    }

    /// Log one activity against a random lead, bump its last-contact time,
    /// and with 20% probability advance its funnel status.
    ///
    /// Returns `None` when there are no leads.
    pub fn record_activity(&mut self) -> Option<ActivityId> {
        if self.leads.is_empty() {
            return None;
        }
        let lead_idx = self.rng.random_range(0..self.leads.len());

        let id = ActivityId::new(self.next_activity_id);
        self.next_activity_id += 1;

        let responsavel = fake::full_name(&mut self.rng);
        let activity = Activity {
            id,
            lead_id: self.leads[lead_idx].id,
            tipo: ACTIVITY_TYPES
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(ACTIVITY_TYPES[0])
                .to_string(),
            data_atividade: Utc::now(),
            duracao_minutos: self.rng.random_range(5..=120),
            resultado: ACTIVITY_RESULTS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or(ACTIVITY_RESULTS[0])
                .to_string(),
            responsavel,
        };

        let lead = &mut self.leads[lead_idx];
        lead.ultimo_contato = activity.data_atividade;
        if self.rng.random_bool(0.2) {
            lead.status = lead.status.advance(&mut self.rng);
        }

        tracing::info!(
            atividade = %activity.id,
            lead = %lead.id,
            tipo = %activity.tipo,
            "New activity"
        );
        self.atividades.push(activity);
        Some(id)
    }

    /// Draw the churn pause (5 - 15 seconds).
    pub fn next_pause(&mut self) -> std::time::Duration {
        std::time::Duration::from_millis(self.rng.random_range(5_000..=15_000))
    }

    /// Whether this tick should log an activity (60% of ticks).
    pub fn should_log_activity(&mut self) -> bool {
        self.rng.random_bool(0.6)
    }

    /// Percentage of leads currently converted.
    #[must_use]
    pub fn conversion_rate(&self) -> Decimal {
        if self.leads.is_empty() {
            return Decimal::ZERO;
        }
        let converted = self
            .leads
            .iter()
            .filter(|l| l.status == LeadStatus::Convertido)
            .count();
        (Decimal::from(converted) * Decimal::ONE_HUNDRED / Decimal::from(self.leads.len() as u64))
            .round_dp(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> CrmState {
        CrmState::seeded_with(StdRng::seed_from_u64(23))
    }

    #[test]
    fn test_seeding_counts() {
        let state = test_state();
        assert_eq!(state.campanhas.len(), INITIAL_CAMPAIGNS);
        assert_eq!(state.leads.len(), INITIAL_LEADS);
        assert!(state.atividades.is_empty());
    }

    #[test]
    fn test_leads_carry_validated_emails() {
        let state = test_state();
        assert!(
            state
                .leads
                .iter()
                .all(|l| l.email.domain() == "exemplo.com" && !l.email.local_part().is_empty())
        );
    }

    #[test]
    fn test_campaign_lead_counters_are_consistent() {
        let state = test_state();
        let counted: u32 = state.campanhas.iter().map(|c| c.leads_gerados).sum();
        let attributed = state.leads.iter().filter(|l| l.campanha_id.is_some()).count();
        assert_eq!(counted as usize, attributed);
    }

    #[test]
    fn test_record_activity_touches_lead() {
        let mut state = test_state();
        let before = state.leads.clone();

        state.record_activity().expect("seeded state has leads");
        let activity = state.atividades.last().expect("activity recorded");

        let lead = state
            .leads
            .iter()
            .find(|l| l.id == activity.lead_id)
            .expect("activity references a known lead");
        let old = before.iter().find(|l| l.id == lead.id).expect("lead existed");
        assert!(lead.ultimo_contato >= old.ultimo_contato);
    }

    #[test]
    fn test_churned_statuses_remain_legal() {
        let mut state = test_state();
        // Forcing many activities exercises the 20% advance path
        for _ in 0..2_000 {
            let _ = state.record_activity();
        }
        // Every lead still holds one of the five defined statuses and the
        // conversion rate stays within [0, 100]
        let rate = state.conversion_rate();
        assert!(rate >= Decimal::ZERO && rate <= Decimal::ONE_HUNDRED);
    }
}
