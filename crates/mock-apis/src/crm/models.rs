//! Wire types for the CRM service.

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

use mercado_core::{ActivityId, CampaignId, Email, LeadId, Price};

/// Campaign channel types.
pub const CAMPAIGN_TYPES: [&str; 7] = [
    "Email Marketing",
    "Google Ads",
    "Facebook Ads",
    "LinkedIn Ads",
    "Webinar",
    "Trade Show",
    "Cold Call",
];

/// Lead acquisition sources.
pub const LEAD_SOURCES: [&str; 5] = ["Website", "Social Media", "Referência", "Cold Call", "Email"];

/// Lead interest levels.
pub const INTEREST_LEVELS: [&str; 3] = ["Alto", "Médio", "Baixo"];

/// Activity types logged by the churn task.
pub const ACTIVITY_TYPES: [&str; 5] = ["Ligação", "Email", "Reunião", "Proposta", "Follow-up"];

/// Activity outcomes.
pub const ACTIVITY_RESULTS: [&str; 3] = ["Positivo", "Neutro", "Negativo"];

/// Where a lead sits in the funnel.
///
/// `Convertido` and `Perdido` are terminal; [`LeadStatus::advance`] encodes
/// the only legal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LeadStatus {
    Novo,
    Contactado,
    Qualificado,
    Convertido,
    Perdido,
}

impl LeadStatus {
    /// One step through the funnel. Terminal states return themselves.
    #[must_use]
    pub fn advance<R: Rng>(self, rng: &mut R) -> Self {
        match self {
            Self::Novo => Self::Contactado,
            Self::Contactado => {
                if rng.random_bool(0.5) {
                    Self::Qualificado
                } else {
                    Self::Perdido
                }
            }
            Self::Qualificado => {
                if rng.random_bool(0.5) {
                    Self::Convertido
                } else {
                    Self::Perdido
                }
            }
            terminal @ (Self::Convertido | Self::Perdido) => terminal,
        }
    }

    /// Display label, which doubles as the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Novo => "Novo",
            Self::Contactado => "Contactado",
            Self::Qualificado => "Qualificado",
            Self::Convertido => "Convertido",
            Self::Perdido => "Perdido",
        }
    }
}

/// A marketing campaign.
#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub nome: String,
    pub tipo: String,
    pub orcamento: Price,
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
    pub status: String,
    pub meta_leads: u32,
    pub leads_gerados: u32,
    /// Click-through rate in percent.
    pub ctr: Decimal,
    /// Cost per click.
    pub cpc: Price,
}

/// A sales lead.
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    pub id: LeadId,
    pub nome: String,
    pub email: Email,
    pub telefone: String,
    pub empresa: String,
    pub cargo: String,
    pub fonte: String,
    pub campanha_id: Option<CampaignId>,
    pub score: i32,
    pub status: LeadStatus,
    pub data_criacao: DateTime<Utc>,
    pub ultimo_contato: DateTime<Utc>,
    pub interesse: String,
    pub orcamento_estimado: Price,
}

/// A logged touchpoint against a lead.
#[derive(Debug, Clone, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub lead_id: LeadId,
    pub tipo: String,
    pub data_atividade: DateTime<Utc>,
    pub duracao_minutos: i32,
    pub resultado: String,
    pub responsavel: String,
}
